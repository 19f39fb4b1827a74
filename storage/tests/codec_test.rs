use socnet_core::model::Arc;
use std::collections::BTreeSet;
use storage::codec::{decode, encode};
use storage::{SnapshotStore, SocialNetwork};
use tempfile::tempdir;

fn full_network() -> SocialNetwork {
    let mut network = SocialNetwork::new("campus");
    network.create_user("Doe", "Jane", 20).unwrap();
    network.create_user("Roe", "Jim", 22).unwrap();
    network.create_user("Poe", "Ann", 35).unwrap();
    network.create_user("Loner", "Lou", 40).unwrap();
    network.create_page("Acme").unwrap();
    network.create_page("Quiet").unwrap();

    network.follow("Doe Jane", "Roe Jim").unwrap();
    network.follow("Roe Jim", "Doe Jane").unwrap();
    network.like("Doe Jane", "Acme").unwrap();
    network.like("Poe Ann", "Acme").unwrap();
    network.add_admin("Acme", "Roe Jim").unwrap();
    network
}

fn vertex_names(network: &SocialNetwork) -> BTreeSet<String> {
    use socnet_core::model::Vertex;
    network
        .graph()
        .vertex_set()
        .into_iter()
        .map(|v| v.name().to_string())
        .collect()
}

fn arcs(network: &SocialNetwork) -> BTreeSet<Arc> {
    network.graph().arc_set().into_iter().cloned().collect()
}

#[test]
fn test_round_trip_preserves_vertices_and_arcs() {
    let original = full_network();
    let restored = decode("campus", &encode(&original)).unwrap();

    assert_eq!(vertex_names(&restored), vertex_names(&original));
    assert_eq!(arcs(&restored), arcs(&original));
    assert_eq!(
        restored.vertex_by_name("Poe Ann").unwrap().as_user().unwrap().age(),
        35
    );
    assert_eq!(restored.admins().len(), 1);
}

#[test]
fn test_decode_reconstructs_relation_kinds() {
    let input = "U:Doe:Jane:20\nU:Roe:Jim:22\nP:Acme\nA:Doe Jane:Roe Jim:Acme\nA:Acme:Roe Jim\n";
    let network = decode("campus", input).unwrap();

    assert_eq!(network.follows("Doe Jane").unwrap().len(), 1);
    assert_eq!(network.likes("Doe Jane").unwrap().len(), 1);
    assert_eq!(network.admins_of("Acme").unwrap().len(), 1);
}

#[test]
fn test_snapshot_store_round_trip() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let original = full_network();

    let path = store.save(&original).unwrap();
    assert_eq!(path.file_name().unwrap(), "campus.txt");

    let restored = store.load("campus").unwrap();
    assert_eq!(restored.name(), "campus");
    assert_eq!(vertex_names(&restored), vertex_names(&original));
    assert_eq!(arcs(&restored), arcs(&original));
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let mut network = full_network();
    store.save(&network).unwrap();

    network.remove_user("Loner Lou").unwrap();
    store.save(&network).unwrap();

    let restored = store.load("campus").unwrap();
    assert!(restored.vertex_by_name("Loner Lou").is_none());
}
