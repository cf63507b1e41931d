use super::*;
use crate::common::{PolygonMesh, RgbaColor, EPSILON};
use crate::memory::{MemoryBinding, MemoryObject};
use crate::scene::{NodeKind, Scene};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sphere_mesh() -> PolygonMesh {
    PolygonMesh::new(
        vec![[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
        vec![3, 3],
        vec![0, 1, 2, 2, 1, 3],
    )
}

#[rustfmt::skip]
fn translation(x: f32, y: f32, z: f32) -> [f32; 16] {
    [
        1.0, 0.0, 0.0, x,
        0.0, 1.0, 0.0, y,
        0.0, 0.0, 1.0, z,
        0.0, 0.0, 0.0, 1.0,
    ]
}

fn assert_position(scene: &Scene, path: &str, expected: [f32; 3]) {
    let node = scene
        .find_node_by_path(path)
        .unwrap_or_else(|| panic!("no node at {path}"));
    let position = scene.get_node(node).unwrap().position();
    assert!((position.x - expected[0]).abs() < EPSILON, "{path}: x = {}", position.x);
    assert!((position.y - expected[1]).abs() < EPSILON, "{path}: y = {}", position.y);
    assert!((position.z - expected[2]).abs() < EPSILON, "{path}: z = {}", position.z);
}

// ========================================================================
// End to end
// ========================================================================

#[test]
fn test_sphere_under_transform() {
    init_logging();

    let geo = MemoryObject::transform("/World/Geo", translation(0.0, 2.0, 0.0)).into_ref();
    let sphere = MemoryObject::shape("/World/Geo/Sphere", "sphere_001", sphere_mesh())
        .with_local_transform(translation(1.0, 0.0, 0.0))
        .with_color(RgbaColor::rgb(0.7, 0.7, 0.7))
        .with_parent(geo)
        .into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![sphere]);

    let mut scene = Scene::new();
    let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    assert_eq!(outcome.top_level_nodes, vec!["World"]);
    assert_eq!(
        outcome.created_nodes,
        vec!["World", "World/Geo", "World/Geo/Sphere"]
    );
    assert!(outcome.warnings.is_empty());

    let world = scene.find_node_by_path("World").unwrap();
    let geo = scene.find_node_by_path("World/Geo").unwrap();
    let sphere = scene.find_node_by_path("World/Geo/Sphere").unwrap();
    assert_eq!(scene.get_node(world).unwrap().kind(), NodeKind::Transform);
    assert_eq!(scene.get_node(geo).unwrap().kind(), NodeKind::Transform);
    assert_eq!(scene.get_node(sphere).unwrap().kind(), NodeKind::Geometry);

    assert_position(&scene, "World", [0.0, 0.0, 0.0]);
    assert_position(&scene, "World/Geo", [0.0, 2.0, 0.0]);
    assert_position(&scene, "World/Geo/Sphere", [1.0, 0.0, 0.0]);

    let group = scene.find_shading_group("Material_r178g178b178ColorSG").unwrap();
    assert_eq!(scene.get_shading_group(group).unwrap().members(), &[sphere]);
}

#[test]
fn test_binding_failure_creates_nothing() {
    init_logging();

    let shape = MemoryObject::shape("/World/Ball", "ball", sphere_mesh()).into_ref();
    let mut binding = MemoryBinding::new()
        .with_objects("objects", vec![shape])
        .with_failure(BindingError::new("execution failed"));

    let mut scene = Scene::new();
    let result = materialize(&mut binding, &mut scene, &ImportOptions::default());

    assert!(matches!(result, Err(ImportError::BindingExecution(_))));
    assert!(scene.nodes.is_empty());
    assert!(scene.shading_groups.is_empty());
}

// ========================================================================
// Hierarchy
// ========================================================================

#[test]
fn test_undeclared_parent_is_materialized() {
    init_logging();

    let rig = MemoryObject::group("/Rig").into_ref();
    let arm = MemoryObject::transform("/Rig/Arm", translation(3.0, 0.0, 0.0))
        .with_parent(rig)
        .into_ref();
    let hand = MemoryObject::group("/Rig/Arm/Hand").with_parent(arm).into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![hand]);

    let mut scene = Scene::new();
    let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    let arm = scene.find_node_by_path("Rig/Arm").unwrap();
    let hand = scene.find_node_by_path("Rig/Arm/Hand").unwrap();
    assert_eq!(scene.get_node(hand).unwrap().parent(), Some(arm));
    assert_position(&scene, "Rig/Arm", [3.0, 0.0, 0.0]);
    assert_eq!(outcome.top_level_nodes, vec!["Rig"]);
    assert_eq!(scene.nodes.len(), 3);
}

#[test]
fn test_root_prefix_groups_import() {
    init_logging();

    let world = MemoryObject::group("/World").into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![world]);

    let mut scene = Scene::new();
    let options = ImportOptions::new().with_root_prefix("Shot01");
    let outcome = materialize(&mut binding, &mut scene, &options).unwrap();

    assert_eq!(outcome.top_level_nodes, vec!["Shot01"]);
    assert_eq!(outcome.created_nodes, vec!["Shot01", "Shot01/World"]);
}

#[test]
fn test_empty_path_with_prefix_creates_nothing() {
    init_logging();

    let unnamed = MemoryObject::group("/_1").into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![unnamed]);

    let mut scene = Scene::new();
    let options = ImportOptions::new().with_root_prefix("Imported");
    let outcome = materialize(&mut binding, &mut scene, &options).unwrap();

    assert!(outcome.created_nodes.is_empty());
    assert!(scene.nodes.is_empty());
}

#[test]
fn test_names_are_normalized() {
    init_logging();

    let group = MemoryObject::group("/ns:_01World/geo:Props").into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![group]);

    let mut scene = Scene::new();
    materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    assert_eq!(scene.dag_paths(), vec!["World", "World/Props"]);
}

// ========================================================================
// Shapes and shading
// ========================================================================

#[test]
fn test_shared_shape_content_creates_one_geometry_node() {
    init_logging();

    let left = MemoryObject::group("/Left").into_ref();
    let right = MemoryObject::group("/Right").into_ref();
    let first = MemoryObject::shape("/Left/Wheel", "wheel_mesh", sphere_mesh())
        .with_parent(left)
        .into_ref();
    let second = MemoryObject::shape("/Right/Wheel", "wheel_mesh", sphere_mesh())
        .with_parent(right)
        .into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![first, second]);

    let mut scene = Scene::new();
    let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    let geometry: Vec<_> = scene
        .nodes
        .values()
        .filter(|node| node.kind() == NodeKind::Geometry)
        .collect();
    assert_eq!(geometry.len(), 1);
    assert_eq!(scene.meshes.len(), 1);

    let left = scene.find_node_by_path("Left").unwrap();
    let right = scene.find_node_by_path("Right").unwrap();
    assert_eq!(geometry[0].parents(), &[left, right]);
    assert_eq!(
        scene.dag_paths(),
        vec!["Left", "Left/Wheel", "Right", "Right/Wheel"]
    );
    assert_eq!(outcome.top_level_nodes, vec!["Left", "Right"]);
}

#[test]
fn test_equal_flat_colors_share_one_shading_group() {
    init_logging();

    let a = MemoryObject::shape("/A", "a", sphere_mesh())
        .with_color(RgbaColor::rgb(0.501, 0.0, 0.0))
        .into_ref();
    let b = MemoryObject::shape("/B", "b", sphere_mesh())
        .with_color(RgbaColor::rgb(0.503, 0.0, 0.0))
        .into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![a, b]);

    let mut scene = Scene::new();
    materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    assert_eq!(scene.shading_groups.len(), 1);
    let group = scene.find_shading_group("Material_r128g0b0ColorSG").unwrap();
    assert_eq!(scene.get_shading_group(group).unwrap().members().len(), 2);
}

#[test]
fn test_reimport_reuses_shading_groups() {
    init_logging();

    let mut scene = Scene::new();
    for prefix in ["First", "Second"] {
        let shape = MemoryObject::shape("/Ball", "ball", sphere_mesh()).into_ref();
        let mut binding = MemoryBinding::new().with_objects("objects", vec![shape]);
        let options = ImportOptions::new().with_root_prefix(prefix);
        materialize(&mut binding, &mut scene, &options).unwrap();
    }

    assert_eq!(scene.shading_groups.len(), 1);
    let group = scene.find_shading_group("Material_r255g255b255ColorSG").unwrap();
    assert_eq!(scene.get_shading_group(group).unwrap().members().len(), 2);
}

// ========================================================================
// Recoverable problems
// ========================================================================

#[test]
fn test_unsupported_objects_do_not_stop_import() {
    init_logging();

    let world = MemoryObject::group("/World").into_ref();
    let light = MemoryObject::new("Light", "/World/Key").into_ref();
    let volume = MemoryObject::new("Volume", "/World/Fog").into_ref();
    let hair = MemoryObject::shape("/World/Hair", "hair", sphere_mesh())
        .with_geometry_type(GeometryType::Curves)
        .into_ref();
    let ball = MemoryObject::shape("/World/Ball", "ball", sphere_mesh()).into_ref();
    let mut binding =
        MemoryBinding::new().with_objects("objects", vec![world, light, volume, hair, ball]);

    let mut scene = Scene::new();
    let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    let kinds: Vec<WarningKind> = outcome.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WarningKind::UnsupportedObjectType, WarningKind::UnsupportedGeometry]
    );
    assert_eq!(outcome.created_nodes, vec!["World", "World/Ball"]);
}

#[test]
fn test_importer_failure_skips_only_that_object() {
    init_logging();

    let broken = MemoryObject::shape("/Broken", "broken", sphere_mesh())
        .failing("getGeometry")
        .into_ref();
    let fine = MemoryObject::shape("/Fine", "fine", sphere_mesh()).into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![broken, fine]);

    let mut scene = Scene::new();
    let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    assert_eq!(outcome.created_nodes, vec!["Fine"]);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::ImporterFailure);
    assert_eq!(outcome.warnings[0].subject, "/Broken");
}

#[test]
fn test_too_deep_path_is_skipped() {
    init_logging();

    let deep = MemoryObject::group("/a/b/c/d").into_ref();
    let shallow = MemoryObject::group("/x").into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![deep, shallow]);

    let mut scene = Scene::new();
    let options = ImportOptions::new().with_max_depth(3);
    let outcome = materialize(&mut binding, &mut scene, &options).unwrap();

    assert_eq!(outcome.created_nodes, vec!["x"]);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::DepthExceeded);
}

// ========================================================================
// Arguments and incremental use
// ========================================================================

#[test]
fn test_arguments_then_materialize() {
    init_logging();

    let ball = MemoryObject::shape("/Ball", "ball", sphere_mesh()).into_ref();
    let mut binding = MemoryBinding::new()
        .with_input("radius", "Float32")
        .with_objects("objects", vec![ball]);

    let warnings = apply_arguments(&mut binding, [("radius", ArgValue::Float(2.5))]).unwrap();
    assert!(warnings.is_empty());

    let mut scene = Scene::new();
    let outcome = materialize(&mut binding, &mut scene, &ImportOptions::default()).unwrap();

    assert_eq!(outcome.top_level_nodes, vec!["Ball"]);
    assert_eq!(binding.execution_count(), 1);
}

#[test]
fn test_session_passes_can_be_driven_directly() {
    init_logging();

    let world = MemoryObject::group("/World").into_ref();
    let crate_shape = MemoryObject::shape("/World/Crate", "crate", sphere_mesh())
        .with_parent(world.clone())
        .into_ref();
    let mut binding = MemoryBinding::new().with_objects("objects", vec![crate_shape.clone()]);

    let mut scene = Scene::new();
    let mut session = ImportSession::new(&mut scene, ImportOptions::default());
    session.register_objects(&mut binding).unwrap();
    assert_eq!(session.registry().len(), 2);

    session.get_or_create_node_for_object(world.as_ref()).unwrap();
    assert!(session.update_shape(crate_shape.as_ref()).unwrap());
    assert!(session.update_shape(crate_shape.as_ref()).unwrap());

    let outcome = session.outcome();
    assert_eq!(outcome.created_nodes, vec!["World", "World/Crate"]);
    assert_eq!(scene.meshes.len(), 1);
}
