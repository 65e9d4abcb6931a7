//! Integration tests for particle dump export

use rstest::{fixture, rstest};
use spheretools_dump::{
    export_level, export_tree, read_dump, write_level, BoxBounds, DumpWriter, DEFAULT_TIMESTEP,
};
use spheretools_tree::{read_sph, RadiusPolicy, Sphere, SphereTree};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}

#[fixture]
fn tree() -> SphereTree {
    read_sph("./data/tree_2x8.sph", RadiusPolicy::Drop).unwrap()
}

#[fixture]
fn awkward() -> Vec<Sphere> {
    vec![
        Sphere::new([1.23456789e-5, -98765.4321, 3.14159265358979], 0.333333333),
        Sphere::new([0.0, -0.0, 1e12], 7.0e-9),
        Sphere::new([-2.5, 100.0, 0.1], 42.0),
    ]
}

#[rstest]
fn fixed_layout(awkward: Vec<Sphere>) {
    let dump = export_level(&awkward, 10000);
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines.len(), 9 + awkward.len());
    assert_eq!(lines[0], "ITEM: TIMESTEP");
    assert_eq!(lines[1], "10000");
    assert_eq!(lines[2], "ITEM: NUMBER OF ATOMS");
    assert_eq!(lines[3], "3");
    assert_eq!(lines[4], "ITEM: BOX BOUNDS ff ff ff");
    for line in &lines[5..8] {
        assert_eq!(*line, "-1.00000000e+00 1.00000000e+00");
    }
    assert_eq!(lines[8], "ITEM: ATOMS id x y z radius");
    assert!(lines[9].starts_with("1 "));
    assert!(lines[11].starts_with("3 "));
}

#[rstest]
fn round_trip(awkward: Vec<Sphere>) {
    let dump = read_dump(&export_level(&awkward, 7)).unwrap();

    assert_eq!(dump.timestep, 7);
    assert_eq!(dump.records.len(), awkward.len());
    for (i, (record, sphere)) in dump.records.iter().zip(&awkward).enumerate() {
        assert_eq!(record.id, i as u64 + 1);
        for (a, b) in record.sphere.xyzr().iter().zip(sphere.xyzr()) {
            assert!(close(*a, b), "{a} != {b}");
        }
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(10000)]
#[case(u64::MAX)]
fn empty_level(#[case] timestep: u64) {
    let dump = export_level(&[], timestep);
    let parsed = read_dump(&dump).unwrap();

    assert_eq!(parsed.timestep, timestep);
    assert!(parsed.records.is_empty());
    assert_eq!(dump.lines().nth(3), Some("0"));
}

#[rstest]
fn writer_matches_string(awkward: Vec<Sphere>) {
    let mut buffer = Vec::new();
    write_level(&mut buffer, &awkward, 99).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), export_level(&awkward, 99));
}

#[rstest]
fn one_dump_per_level(tree: SphereTree) {
    let dumps = export_tree(&tree);
    assert_eq!(dumps.len(), tree.level_count());

    for (expected, (level, text)) in dumps.iter().enumerate() {
        assert_eq!(*level, expected);

        let dump = read_dump(text).unwrap();
        assert_eq!(dump.timestep, DEFAULT_TIMESTEP);

        let spheres = tree.level_spheres(*level);
        assert_eq!(dump.records.len(), spheres.len());
        for (record, sphere) in dump.records.iter().zip(spheres) {
            assert_eq!(record.sphere, *sphere);
        }
    }

    // two pruned spheres dropped from the 8 in level 1
    assert_eq!(read_dump(&dumps[1].1).unwrap().records.len(), 6);
}

#[rstest]
fn fitted_bounds(tree: SphereTree) {
    let mut writer = DumpWriter::new();
    writer.set_bounds(BoxBounds::Fit);
    writer.set_timestep(5);

    let dump = read_dump(&writer.export_level(tree.level_spheres(0))).unwrap();
    for [min, max] in dump.bounds {
        assert!(close(min, -1.7320508));
        assert!(close(max, 1.7320508));
    }

    // nothing to fit around
    let dump = read_dump(&writer.export_level(&[])).unwrap();
    assert_eq!(dump.bounds, [[-1.0, 1.0]; 3]);
}

#[rstest]
fn fixed_bounds() {
    let mut writer = DumpWriter::new();
    writer.set_bounds(BoxBounds::Fixed([[0.0, 1.0], [-2.0, 2.0], [-0.5, 10.0]]));

    let dump = read_dump(&writer.export_level(&[])).unwrap();
    assert_eq!(dump.bounds, [[0.0, 1.0], [-2.0, 2.0], [-0.5, 10.0]]);
}
