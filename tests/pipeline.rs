//! End-to-end checks from netlist documents to laid-out drawings.

use std::collections::HashSet;

use approx::assert_relative_eq;
use netlist_draw::layout::{BoundingBox, Point};
use netlist_draw::netlist::{self, RandomNetlist};
use netlist_draw::{AtomKind, LayoutConfig, NetlistError, Netlist, Schematic};

const CHAIN: &str = r#"{
    "FFs": {},
    "OPins": { "o1": { "iports": { "o1_in": "" }, "oports": "" } },
    "IPins": { "i1": { "iports": "", "oports": { "out": ["l1_a"] } } },
    "LUTs": { "l1": { "iports": { "l1_a": "" }, "oports": { "out": ["o1_in"] } } }
}"#;

fn random(seed: u64) -> Netlist {
    RandomNetlist::new(6, 4, 12, 10)
        .with_seed(seed)
        .with_connect_prob(0.5)
        .generate()
        .unwrap()
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values
}

#[test]
fn chain_has_three_nodes_two_edges() {
    let schematic = Schematic::from_json(CHAIN, &LayoutConfig::default()).unwrap();
    let graph = &schematic.graph;

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.contains_edge("i1", "l1"));
    assert!(graph.contains_edge("l1", "o1"));

    let i1 = schematic.positions.get("i1").unwrap();
    let o1 = schematic.positions.get("o1").unwrap();
    let l1 = schematic.positions.get("l1").unwrap();
    assert!(i1.x < o1.x);
    assert!(i1.x <= l1.x && l1.x <= o1.x);
}

#[test]
fn chain_with_single_iteration() {
    let config = LayoutConfig::new().with_iterations(1);
    let schematic = Schematic::from_json(CHAIN, &config).unwrap();
    assert_eq!(schematic.positions.len(), 3);
}

#[test]
fn unknown_port_is_reported() {
    let input = r#"{ "FFs": {}, "OPins": {}, "IPins": {},
        "LUTs": { "l1": { "iports": "", "oports": { "out": ["x9"] } } } }"#;
    match Schematic::from_json(input, &LayoutConfig::default()) {
        Err(NetlistError::UnresolvedPort { port, .. }) => assert_eq!(port, "x9"),
        other => panic!("expected an unresolved port, got {other:?}"),
    }
}

#[test]
fn no_output_pins_is_fine() {
    let input = r#"{ "FFs": {}, "OPins": {},
        "IPins": { "i1": { "oports": { "out": ["l1_a"] } }, "i2": { "oports": { "out": ["l1_b"] } } },
        "LUTs": { "l1": { "iports": { "l1_a": "", "l1_b": "" }, "oports": "" } } }"#;
    let schematic = Schematic::from_json(input, &LayoutConfig::default()).unwrap();
    assert_eq!(schematic.positions.len(), 3);
    assert!(schematic.graph.nodes_of_kind(AtomKind::OutputPin).is_empty());
}

#[test]
fn duplicate_input_port_is_malformed() {
    let input = r#"{ "FFs": { "f1": { "iports": { "p": "" } } }, "OPins": {}, "IPins": {},
        "LUTs": { "l1": { "iports": { "p": "" } } } }"#;
    assert!(matches!(
        Schematic::from_json(input, &LayoutConfig::default()),
        Err(NetlistError::MalformedInput { .. })
    ));
}

#[test]
fn missing_file_is_unreadable() {
    let err = Schematic::from_file(
        std::path::Path::new("/definitely/not/here.json"),
        &LayoutConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, NetlistError::FileUnreadable { .. }));
}

#[test]
fn edges_match_wiring_exactly() {
    for seed in 0..5 {
        let netlist = random(seed);
        let schematic = Schematic::from_netlist(&netlist, &LayoutConfig::default()).unwrap();

        let mut owner = std::collections::HashMap::new();
        for atom in netlist.iter() {
            for port in &atom.inputs {
                owner.insert(port.as_str(), atom.id.as_str());
            }
        }
        let expected: HashSet<(&str, &str)> = netlist
            .iter()
            .flat_map(|atom| atom.fanout().map(|(_, dest)| (atom.id.as_str(), owner[dest])))
            .collect();
        let actual: Vec<(&str, &str)> = schematic.graph.edges().collect();

        assert_eq!(actual.len(), expected.len(), "duplicate edges for seed {seed}");
        assert_eq!(actual.into_iter().collect::<HashSet<_>>(), expected);
    }
}

#[test]
fn every_atom_is_one_node_with_its_kind() {
    let netlist = random(42);
    let schematic = Schematic::from_netlist(&netlist, &LayoutConfig::default()).unwrap();

    assert_eq!(schematic.graph.node_count(), netlist.len());
    for atom in netlist.iter() {
        assert_eq!(schematic.graph.kind(&atom.id), Some(atom.kind));
    }
}

#[test]
fn positions_cover_exactly_the_nodes() {
    let netlist = random(7);
    let schematic = Schematic::from_netlist(&netlist, &LayoutConfig::default()).unwrap();

    assert_eq!(schematic.positions.len(), schematic.graph.node_count());
    for node in schematic.graph.nodes() {
        assert!(schematic.positions.contains(&node.id));
    }
}

#[test]
fn pins_sit_on_two_evenly_spaced_rails() {
    let config = LayoutConfig::default();
    let netlist = random(3);
    let schematic = Schematic::from_netlist(&netlist, &config).unwrap();
    let graph = &schematic.graph;
    let at = |id: &str| schematic.positions.get(id).unwrap();

    let internal: Vec<Point> = graph
        .nodes()
        .filter(|node| !node.kind.is_boundary_pin())
        .map(|node| at(&node.id))
        .collect();
    let inner = BoundingBox::of(&internal).unwrap();

    let inputs: Vec<Point> = graph.nodes_of_kind(AtomKind::InputPin).into_iter().map(at).collect();
    let outputs: Vec<Point> = graph.nodes_of_kind(AtomKind::OutputPin).into_iter().map(at).collect();

    let input_x = inputs[0].x;
    let output_x = outputs[0].x;
    assert!(inputs.iter().all(|p| p.x == input_x));
    assert!(outputs.iter().all(|p| p.x == output_x));
    assert!(input_x < output_x);
    assert!(input_x < inner.min_x);
    assert!(output_x > inner.max_x);

    // both rails divide the same provisional y range, starting at its bottom
    let mut ranges = Vec::new();
    for rail in [&inputs, &outputs] {
        let ys = sorted(rail.iter().map(|p| p.y).collect());
        let spacing = ys[1] - ys[0];
        assert!(spacing > 0.0);
        for pair in ys.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], spacing, epsilon = 1e-9);
        }
        assert!(ys[0] <= inner.min_y + 1e-9);
        ranges.push((ys[0], spacing * ys.len() as f64));
    }
    assert_relative_eq!(ranges[0].0, ranges[1].0, epsilon = 1e-9);
    assert_relative_eq!(ranges[0].1, ranges[1].1, epsilon = 1e-9);
    assert!(ranges[0].0 + ranges[0].1 >= inner.max_y - 1e-9);
}

#[test]
fn layout_is_deterministic() {
    let netlist = random(11);
    let config = LayoutConfig::new().with_seed(99);
    let a = Schematic::from_netlist(&netlist, &config).unwrap();
    let b = Schematic::from_netlist(&netlist, &config).unwrap();
    assert_eq!(a.positions, b.positions);
}

#[test]
fn dumped_random_netlist_parses_back() {
    let netlist = random(5);
    let text = netlist.to_json_pretty().unwrap();
    let parsed = netlist::parse(&text).unwrap();
    assert_eq!(parsed, netlist);

    let config = LayoutConfig::default();
    let a = Schematic::from_netlist(&netlist, &config).unwrap();
    let b = Schematic::from_json(&text, &config).unwrap();
    assert_eq!(a.positions, b.positions);
}

#[test]
fn drawing_groups_by_kind() {
    let netlist = random(1);
    let schematic = Schematic::from_netlist(&netlist, &LayoutConfig::default()).unwrap();
    let drawing = schematic.drawing().unwrap();

    assert_eq!(drawing.group(AtomKind::InputPin).len(), 6);
    assert_eq!(drawing.group(AtomKind::OutputPin).len(), 4);
    assert_eq!(drawing.group(AtomKind::LookupTable).len(), 12);
    assert_eq!(drawing.group(AtomKind::FlipFlop).len(), 10);
    assert_eq!(drawing.edges.len(), schematic.graph.edge_count());
}

#[test]
fn phased_netlist_keeps_phases_through_dump() {
    let netlist = RandomNetlist::new(4, 3, 10, 8)
        .with_phases(3)
        .with_seed(2)
        .generate()
        .unwrap();
    let parsed = netlist::parse(&netlist.to_json().to_string()).unwrap();
    assert_eq!(parsed, netlist);

    let phases: HashSet<Option<u32>> = parsed.luts().iter().map(|atom| atom.phase).collect();
    assert_eq!(phases, HashSet::from([Some(0), Some(1), Some(2)]));

    let schematic = Schematic::from_netlist(&parsed, &LayoutConfig::default()).unwrap();
    assert_eq!(schematic.positions.len(), parsed.len());
}
