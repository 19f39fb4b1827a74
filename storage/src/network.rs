//! The social domain layer: typed accounts and relations on top of [`Graph`].
//!
//! Relations are plain arcs whose meaning follows from the endpoint kinds:
//! User -> Page is a like, User -> User a follow, Page -> User an administration
//! (the administrator is the destination). Page -> Page arcs never exist.

use crate::index::{Graph, GraphError};
use socnet_core::error::{ErrorCode, SocnetError};
use socnet_core::event::{EventRecord, EventSink, NetworkEvent};
use socnet_core::model::{Account, AccountError, AccountKind, Page, User, Vertex};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("{name} is a {actual} account, expected a {expected} account")]
    KindMismatch {
        name: String,
        expected: AccountKind,
        actual: AccountKind,
    },
}

impl NetworkError {
    /// False for precondition violations (invalid account data), true for
    /// business conditions the caller can fix by retrying with other input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, NetworkError::Account(_))
    }
}

impl SocnetError for NetworkError {
    fn error_code(&self) -> ErrorCode {
        match self {
            NetworkError::Graph(e) => e.error_code(),
            NetworkError::Account(e) => e.error_code(),
            NetworkError::KindMismatch { .. } => ErrorCode::InvalidArgument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Like,
    Follow,
    Admin,
}

impl Relation {
    /// Kinds of the (source, destination) of the arc encoding this relation.
    pub fn endpoints(self) -> (AccountKind, AccountKind) {
        match self {
            Relation::Like => (AccountKind::User, AccountKind::Page),
            Relation::Follow => (AccountKind::User, AccountKind::User),
            Relation::Admin => (AccountKind::Page, AccountKind::User),
        }
    }

    /// Classifies an arc by its endpoint kinds. `None` for Page -> Page.
    pub fn between(from: AccountKind, to: AccountKind) -> Option<Self> {
        match (from, to) {
            (AccountKind::User, AccountKind::Page) => Some(Relation::Like),
            (AccountKind::User, AccountKind::User) => Some(Relation::Follow),
            (AccountKind::Page, AccountKind::User) => Some(Relation::Admin),
            (AccountKind::Page, AccountKind::Page) => None,
        }
    }
}

pub struct SocialNetwork {
    name: String,
    graph: Graph<Account>,
    sinks: Vec<std::sync::Arc<dyn EventSink>>,
}

impl SocialNetwork {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: Graph::new(),
            sinks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a sink notified after every successful mutation.
    pub fn subscribe(&mut self, sink: std::sync::Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Read-only access for the analytics.
    pub fn graph(&self) -> &Graph<Account> {
        &self.graph
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn vertex_by_name(&self, name: &str) -> Option<&Account> {
        self.graph.find_vertex_by_name(name)
    }

    pub fn users(&self) -> Vec<&User> {
        users_of(self.graph.vertex_set_by_name())
    }

    pub fn user_count(&self) -> usize {
        self.users().len()
    }

    pub fn pages(&self) -> Vec<&Page> {
        pages_of(self.graph.vertex_set_by_name())
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Rounded mean age. `None` when there are no users.
    pub fn average_age(&self) -> Option<u32> {
        let users = self.users();
        if users.is_empty() {
            return None;
        }
        let sum: u64 = users.iter().map(|u| u64::from(u.age())).sum();
        let mean = (sum as f64 / users.len() as f64).round();
        Some(mean as u32)
    }

    /// Users administering at least one page.
    pub fn admins(&self) -> Vec<&User> {
        self.users()
            .into_iter()
            .filter(|u| {
                self.graph
                    .vertex_to(u.name())
                    .iter()
                    .any(|v| v.kind() == AccountKind::Page)
            })
            .collect()
    }

    pub fn admins_of(&self, page: &str) -> Result<Vec<&User>, NetworkError> {
        self.expect_kind(page, AccountKind::Page)?;
        Ok(users_of(self.graph.vertex_from(page)))
    }

    pub fn likers(&self, page: &str) -> Result<Vec<&User>, NetworkError> {
        self.expect_kind(page, AccountKind::Page)?;
        Ok(users_of(self.graph.vertex_to(page)))
    }

    pub fn followers(&self, user: &str) -> Result<Vec<&User>, NetworkError> {
        self.expect_kind(user, AccountKind::User)?;
        Ok(users_of(self.graph.vertex_to(user)))
    }

    pub fn follows(&self, user: &str) -> Result<Vec<&User>, NetworkError> {
        self.expect_kind(user, AccountKind::User)?;
        Ok(users_of(self.graph.vertex_from(user)))
    }

    pub fn likes(&self, user: &str) -> Result<Vec<&Page>, NetworkError> {
        self.expect_kind(user, AccountKind::User)?;
        Ok(pages_of(self.graph.vertex_from(user)))
    }

    pub fn pages_of_admin(&self, user: &str) -> Result<Vec<&Page>, NetworkError> {
        self.expect_kind(user, AccountKind::User)?;
        Ok(pages_of(self.graph.vertex_to(user)))
    }

    /// Accounts by number of outgoing relations, most active first.
    pub fn accounts_by_activity(&self) -> Vec<&Account> {
        self.graph.vertex_set_by_degree()
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    pub fn create_user(
        &mut self,
        lastname: &str,
        firstname: &str,
        age: u32,
    ) -> Result<NetworkEvent, NetworkError> {
        let user = User::new(lastname, firstname, age)?;
        let name = user.name().to_string();
        self.graph.add_vertex(user.into())?;
        debug!("Created user {}", name);
        Ok(self.emit(NetworkEvent::UserCreated { name }))
    }

    pub fn create_page(&mut self, name: &str) -> Result<NetworkEvent, NetworkError> {
        let page = Page::new(name)?;
        self.graph.add_vertex(page.into())?;
        debug!("Created page {}", name);
        Ok(self.emit(NetworkEvent::PageCreated {
            name: name.to_string(),
        }))
    }

    pub fn remove_user(&mut self, name: &str) -> Result<NetworkEvent, NetworkError> {
        self.remove_account(name, AccountKind::User)
    }

    pub fn remove_page(&mut self, name: &str) -> Result<NetworkEvent, NetworkError> {
        self.remove_account(name, AccountKind::Page)
    }

    pub fn like(&mut self, user: &str, page: &str) -> Result<NetworkEvent, NetworkError> {
        self.link(Relation::Like, user, page)?;
        Ok(self.emit(NetworkEvent::Liked {
            user: user.to_string(),
            page: page.to_string(),
        }))
    }

    pub fn remove_like(&mut self, user: &str, page: &str) -> Result<NetworkEvent, NetworkError> {
        self.unlink(Relation::Like, user, page)?;
        Ok(self.emit(NetworkEvent::Unliked {
            user: user.to_string(),
            page: page.to_string(),
        }))
    }

    pub fn follow(&mut self, follower: &str, followee: &str) -> Result<NetworkEvent, NetworkError> {
        self.link(Relation::Follow, follower, followee)?;
        Ok(self.emit(NetworkEvent::Followed {
            follower: follower.to_string(),
            followee: followee.to_string(),
        }))
    }

    pub fn remove_follow(
        &mut self,
        follower: &str,
        followee: &str,
    ) -> Result<NetworkEvent, NetworkError> {
        self.unlink(Relation::Follow, follower, followee)?;
        Ok(self.emit(NetworkEvent::Unfollowed {
            follower: follower.to_string(),
            followee: followee.to_string(),
        }))
    }

    /// Makes `user` an administrator of `page` (arc page -> user).
    pub fn add_admin(&mut self, page: &str, user: &str) -> Result<NetworkEvent, NetworkError> {
        self.link(Relation::Admin, page, user)?;
        Ok(self.emit(NetworkEvent::AdminAdded {
            page: page.to_string(),
            user: user.to_string(),
        }))
    }

    pub fn remove_admin(&mut self, page: &str, user: &str) -> Result<NetworkEvent, NetworkError> {
        self.unlink(Relation::Admin, page, user)?;
        Ok(self.emit(NetworkEvent::AdminRemoved {
            page: page.to_string(),
            user: user.to_string(),
        }))
    }

    /// Creates the arc for `relation` between two existing accounts, without
    /// emitting an event. `from`/`to` are given in arc direction.
    pub(crate) fn link(
        &mut self,
        relation: Relation,
        from: &str,
        to: &str,
    ) -> Result<(), NetworkError> {
        let (from_kind, to_kind) = relation.endpoints();
        self.expect_kind(from, from_kind)?;
        self.expect_kind(to, to_kind)?;
        self.graph.create_arc(from, to)?;
        debug!("Created {:?} arc from {} to {}", relation, from, to);
        Ok(())
    }

    fn unlink(&mut self, relation: Relation, from: &str, to: &str) -> Result<(), NetworkError> {
        let (from_kind, to_kind) = relation.endpoints();
        self.expect_kind(from, from_kind)?;
        self.expect_kind(to, to_kind)?;
        self.graph.delete_arc(from, to)?;
        debug!("Deleted {:?} arc from {} to {}", relation, from, to);
        Ok(())
    }

    fn remove_account(
        &mut self,
        name: &str,
        kind: AccountKind,
    ) -> Result<NetworkEvent, NetworkError> {
        self.expect_kind(name, kind)?;
        let (_, arcs) = self.graph.remove_vertex(name)?;
        info!("Removed {} {} and {} relation(s)", kind, name, arcs.len());
        Ok(self.emit(NetworkEvent::AccountRemoved {
            name: name.to_string(),
            account: kind,
            arcs_removed: arcs.len(),
        }))
    }

    fn expect_kind(&self, name: &str, expected: AccountKind) -> Result<&Account, NetworkError> {
        let account = self.graph.get_vertex(name)?;
        if account.kind() != expected {
            return Err(NetworkError::KindMismatch {
                name: name.to_string(),
                expected,
                actual: account.kind(),
            });
        }
        Ok(account)
    }

    fn emit(&self, event: NetworkEvent) -> NetworkEvent {
        for sink in &self.sinks {
            if let Err(e) = sink.record(EventRecord::new(self.name.clone(), event.clone())) {
                warn!("Failed to deliver {:?} to event sink: {}", event, e);
            }
        }
        event
    }
}

fn users_of(accounts: Vec<&Account>) -> Vec<&User> {
    accounts.into_iter().filter_map(Account::as_user).collect()
}

fn pages_of(accounts: Vec<&Account>) -> Vec<&Page> {
    accounts.into_iter().filter_map(Account::as_page).collect()
}
