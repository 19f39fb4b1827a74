use query::{QueryEngine, RankEngine};
use socnet_core::config::AppConfig;
use socnet_core::model::Vertex;
use storage::SocialNetwork;

fn star_network() -> SocialNetwork {
    let mut network = SocialNetwork::new("star");
    network.create_user("Hub", "Hannah", 30).unwrap();
    for (last, first) in [("Aa", "One"), ("Bb", "Two"), ("Cc", "Three")] {
        network.create_user(last, first, 20).unwrap();
        network
            .follow(&format!("{} {}", last, first), "Hub Hannah")
            .unwrap();
    }
    network.create_page("Acme").unwrap();
    network.like("Hub Hannah", "Acme").unwrap();
    network.create_page("Empty").unwrap();
    network
}

#[test]
fn test_ranking_covers_every_account() {
    let network = star_network();
    let ranking = RankEngine::default().ranking(&network);

    assert_eq!(ranking.len(), network.graph().vertex_count());
    let mut names: Vec<&str> = ranking.iter().map(|r| r.account.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ranking.len());
}

#[test]
fn test_ranking_is_descending_with_name_tiebreak() {
    let network = star_network();
    let ranking = RankEngine::default().ranking(&network);

    // Acme collects everything Hannah receives.
    assert_eq!(ranking[0].account.name(), "Acme");
    assert_eq!(ranking[1].account.name(), "Hub Hannah");

    for pair in ranking.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].account.name() < pair[1].account.name());
        }
    }

    // The three followers and the unliked page sit at the teleport term.
    let tail: Vec<&str> = ranking[2..].iter().map(|r| r.account.name()).collect();
    assert_eq!(tail, vec!["Aa One", "Bb Two", "Cc Three", "Empty"]);
    let base = 0.15 / 6.0;
    assert!(ranking[2..].iter().all(|r| (r.score - base).abs() < 1e-12));
}

#[test]
fn test_empty_network_ranks_nothing() {
    let network = SocialNetwork::new("empty");
    assert!(RankEngine::default().ranking(&network).is_empty());
}

#[test]
fn test_query_engine_uses_configured_rank() {
    let mut config = AppConfig::default();
    config.rank.sweeps = 1;
    let engine = QueryEngine::from_config(&config).unwrap();

    let mut network = SocialNetwork::new("pair");
    network.create_user("Doe", "Jane", 20).unwrap();
    network.create_user("Roe", "Jim", 22).unwrap();
    network.follow("Doe Jane", "Roe Jim").unwrap();

    // One sweep from the initial 1.0.
    let ranking = engine.ranking(&network);
    assert_eq!(ranking[0].account.name(), "Roe Jim");
    assert!((ranking[0].score - (0.075 + 0.85)).abs() < 1e-12);

    config.rank.damping = 2.0;
    assert!(QueryEngine::from_config(&config).is_err());
}
