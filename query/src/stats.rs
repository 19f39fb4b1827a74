use serde::{Deserialize, Serialize};
use socnet_core::model::Vertex;
use storage::SocialNetwork;

/// Headline figures about a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub users: usize,
    pub pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_age: Option<u32>,
    pub admins: usize,
    /// Sum over pages of their likers.
    pub likes: usize,
    pub relations: usize,
}

impl NetworkStats {
    pub fn collect(network: &SocialNetwork) -> Self {
        // Only users can point at a page, so in-degree counts likers.
        let likes = network
            .pages()
            .iter()
            .map(|p| network.graph().in_degree(p.name()))
            .sum();

        Self {
            users: network.user_count(),
            pages: network.page_count(),
            average_age: network.average_age(),
            admins: network.admins().len(),
            likes,
            relations: network.graph().arc_count(),
        }
    }
}
