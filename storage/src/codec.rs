//! Line-oriented text format for a whole network.
//!
//! ```text
//! U:<lastname>:<firstname>:<age>
//! P:<name>
//! A:<from>:<to1>:<to2>:...
//! ```
//!
//! Vertex records come first, then one adjacency record per vertex with at
//! least one outgoing arc. Names never contain the delimiter (see
//! `socnet_core::model::RESERVED_CHARS`), so no escaping is needed.

use crate::network::{NetworkError, Relation, SocialNetwork};
use socnet_core::error::{ErrorCode, SocnetError};
use socnet_core::model::{Account, Vertex};
use thiserror::Error;
use tracing::info;

pub const DELIMITER: char = ':';

const USER_TAG: &str = "U";
const PAGE_TAG: &str = "P";
const ADJACENCY_TAG: &str = "A";

/// Any of these aborts decoding; no partially built network is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("line {line}: unrecognized record {record:?}")]
    UnknownRecord { line: usize, record: String },
    #[error("line {line}: wrong number of fields in {record:?}")]
    Arity { line: usize, record: String },
    #[error("line {line}: invalid age {value:?}")]
    InvalidAge { line: usize, value: String },
    #[error("line {line}: page {from} cannot be linked to page {to}")]
    PageToPage { line: usize, from: String, to: String },
    #[error("line {line}: {source}")]
    Network {
        line: usize,
        #[source]
        source: NetworkError,
    },
}

impl SocnetError for CodecError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

pub fn encode_account(account: &Account) -> String {
    match account {
        Account::User(u) => format!(
            "{}{d}{}{d}{}{d}{}",
            USER_TAG,
            u.lastname(),
            u.firstname(),
            u.age(),
            d = DELIMITER
        ),
        Account::Page(p) => format!("{}{}{}", PAGE_TAG, DELIMITER, p.name()),
    }
}

/// Serializes every account, then every non-empty adjacency list, both by name.
pub fn encode(network: &SocialNetwork) -> String {
    let graph = network.graph();
    let accounts = graph.vertex_set_by_name();
    let mut out = String::new();

    for account in &accounts {
        out.push_str(&encode_account(account));
        out.push('\n');
    }

    for account in &accounts {
        let successors = graph.vertex_from(account.name());
        if successors.is_empty() {
            continue;
        }
        out.push_str(ADJACENCY_TAG);
        out.push(DELIMITER);
        out.push_str(account.name());
        for to in successors {
            out.push(DELIMITER);
            out.push_str(to.name());
        }
        out.push('\n');
    }

    out
}

/// Rebuilds a network named `name`, processing lines strictly in order.
pub fn decode(name: &str, input: &str) -> Result<SocialNetwork, CodecError> {
    let mut network = SocialNetwork::new(name);

    for (idx, record) in input.lines().enumerate() {
        decode_line(&mut network, idx + 1, record)?;
    }

    info!(
        "Decoded network {} ({} accounts, {} relations)",
        name,
        network.graph().vertex_count(),
        network.graph().arc_count()
    );
    Ok(network)
}

fn decode_line(network: &mut SocialNetwork, line: usize, record: &str) -> Result<(), CodecError> {
    let fields: Vec<&str> = record.split(DELIMITER).collect();
    let in_line = |source: NetworkError| CodecError::Network { line, source };

    match fields.as_slice() {
        [USER_TAG, lastname, firstname, age] => {
            let age: u32 = age.parse().map_err(|_| CodecError::InvalidAge {
                line,
                value: age.to_string(),
            })?;
            network
                .create_user(lastname, firstname, age)
                .map_err(in_line)?;
        }
        [PAGE_TAG, name] => {
            network.create_page(name).map_err(in_line)?;
        }
        [ADJACENCY_TAG, from, targets @ ..] if !targets.is_empty() => {
            for to in targets {
                let relation = classify(network, line, from, to)?;
                network.link(relation, from, to).map_err(in_line)?;
            }
        }
        [USER_TAG | PAGE_TAG | ADJACENCY_TAG, ..] => {
            return Err(CodecError::Arity {
                line,
                record: record.to_string(),
            });
        }
        _ => {
            return Err(CodecError::UnknownRecord {
                line,
                record: record.to_string(),
            });
        }
    }
    Ok(())
}

fn classify(
    network: &SocialNetwork,
    line: usize,
    from: &str,
    to: &str,
) -> Result<Relation, CodecError> {
    let kind_of = |name: &str| {
        network
            .graph()
            .get_vertex(name)
            .map(Account::kind)
            .map_err(|e| CodecError::Network {
                line,
                source: e.into(),
            })
    };
    let (from_kind, to_kind) = (kind_of(from)?, kind_of(to)?);
    Relation::between(from_kind, to_kind).ok_or_else(|| CodecError::PageToPage {
        line,
        from: from.to_string(),
        to: to.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::GraphError;

    #[test]
    fn test_encode_orders_vertices_then_adjacency() {
        let mut network = SocialNetwork::new("t");
        network.create_user("Roe", "Jim", 22).unwrap();
        network.create_user("Doe", "Jane", 20).unwrap();
        network.create_page("Acme").unwrap();
        network.like("Doe Jane", "Acme").unwrap();
        network.follow("Doe Jane", "Roe Jim").unwrap();
        network.add_admin("Acme", "Roe Jim").unwrap();

        assert_eq!(
            encode(&network),
            "P:Acme\nU:Doe:Jane:20\nU:Roe:Jim:22\nA:Acme:Roe Jim\nA:Doe Jane:Acme:Roe Jim\n"
        );
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let err = decode("t", "P:Acme\nX:whatever\n").err().unwrap();
        assert_eq!(
            err,
            CodecError::UnknownRecord {
                line: 2,
                record: "X:whatever".into()
            }
        );
    }

    #[test]
    fn test_decode_rejects_bad_arity() {
        assert!(matches!(
            decode("t", "U:Doe:Jane"),
            Err(CodecError::Arity { line: 1, .. })
        ));
        assert!(matches!(
            decode("t", "P:Acme\nA:Acme"),
            Err(CodecError::Arity { line: 2, .. })
        ));
        assert!(matches!(
            decode("t", ""),
            Ok(ref n) if n.graph().vertex_count() == 0
        ));
        assert!(matches!(
            decode("t", "P:Acme\n\nP:Other"),
            Err(CodecError::UnknownRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_age() {
        assert_eq!(
            decode("t", "U:Doe:Jane:old").err().unwrap(),
            CodecError::InvalidAge {
                line: 1,
                value: "old".into()
            }
        );
        assert!(matches!(
            decode("t", "U:Doe:Jane:9"),
            Err(CodecError::Network {
                line: 1,
                source: NetworkError::Account(_)
            })
        ));
    }

    #[test]
    fn test_decode_requires_declared_vertices() {
        let err = decode("t", "U:Doe:Jane:20\nA:Doe Jane:Acme\nP:Acme\n")
            .err()
            .unwrap();
        assert_eq!(
            err,
            CodecError::Network {
                line: 2,
                source: NetworkError::Graph(GraphError::VertexNotFound("Acme".into()))
            }
        );
    }

    #[test]
    fn test_decode_requires_declared_source() {
        let err = decode("t", "P:Acme\nA:Doe Jane:Acme\n").err().unwrap();
        assert_eq!(
            err,
            CodecError::Network {
                line: 2,
                source: NetworkError::Graph(GraphError::VertexNotFound("Doe Jane".into()))
            }
        );
    }

    #[test]
    fn test_decode_rejects_page_to_page() {
        let err = decode("t", "P:A\nP:B\nA:A:B\n").err().unwrap();
        assert_eq!(
            err,
            CodecError::PageToPage {
                line: 3,
                from: "A".into(),
                to: "B".into()
            }
        );
    }

    #[test]
    fn test_decode_rejects_duplicate_declaration() {
        assert!(matches!(
            decode("t", "P:Acme\nP:Acme\n"),
            Err(CodecError::Network {
                line: 2,
                source: NetworkError::Graph(GraphError::DuplicateVertex(_))
            })
        ));
    }
}
