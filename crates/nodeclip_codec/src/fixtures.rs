// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scenes shared by the codec tests.

use nodeclip_graph::registry::{GROUP_INPUT, GROUP_INSTANCE, GROUP_OUTPUT};
use nodeclip_graph::{GraphAccessor, InterfaceSocket, NodeAttribute, Scene, SocketSide};

/// Group Input feeding a cube's size, bound to object "Cube"
pub fn cube_scene() -> Scene {
    let mut scene = Scene::new();
    let graph = scene.create_graph("Geometry Nodes").unwrap();
    scene
        .add_interface_socket(
            &graph,
            SocketSide::Input,
            &InterfaceSocket::new("Input_0", "Size", "NodeSocketVector"),
        )
        .unwrap();
    let input = scene.spawn_node(&graph, GROUP_INPUT, "Group Input", [-200.0, 0.0]).unwrap();
    let cube = scene.spawn_node(&graph, "GeometryNodeMeshCube", "Cube", [0.0, 0.0]).unwrap();
    scene.link(&graph, input, 0, cube, 0).unwrap();

    scene.add_object("Cube");
    scene.add_node_modifier("Cube").unwrap();
    scene.set_modifier_graph("Cube", &graph).unwrap();
    scene
}

/// Graph "Main" instancing graph "Leaf", with a curve, multi-input links
/// and a factor interface input
pub fn sample_scene() -> Scene {
    let mut scene = Scene::new();

    scene.create_graph("Leaf").unwrap();
    scene
        .add_interface_socket(
            "Leaf",
            SocketSide::Input,
            &InterfaceSocket::new("Input_0", "Geometry", "NodeSocketGeometry"),
        )
        .unwrap();
    scene
        .add_interface_socket(
            "Leaf",
            SocketSide::Output,
            &InterfaceSocket::new("Output_1", "Geometry", "NodeSocketGeometry"),
        )
        .unwrap();
    let leaf_in = scene.spawn_node("Leaf", GROUP_INPUT, "Group Input", [-200.0, 0.0]).unwrap();
    let transform = scene
        .spawn_node("Leaf", "GeometryNodeTransform", "Transform Geometry", [0.0, 0.0])
        .unwrap();
    let leaf_out = scene.spawn_node("Leaf", GROUP_OUTPUT, "Group Output", [200.0, 0.0]).unwrap();
    scene.link("Leaf", leaf_in, 0, transform, 0).unwrap();
    scene.link("Leaf", transform, 0, leaf_out, 0).unwrap();

    scene.create_graph("Main").unwrap();
    scene
        .add_interface_socket(
            "Main",
            SocketSide::Input,
            &InterfaceSocket::new("Input_0", "Geometry", "NodeSocketGeometry"),
        )
        .unwrap();
    scene
        .add_interface_socket(
            "Main",
            SocketSide::Input,
            &InterfaceSocket::new("Input_1", "Amount", "NodeSocketFloatFactor").with_range(0.25, 0.0, 1.0),
        )
        .unwrap();
    scene
        .add_interface_socket(
            "Main",
            SocketSide::Output,
            &InterfaceSocket::new("Output_2", "Geometry", "NodeSocketGeometry"),
        )
        .unwrap();

    let input = scene.spawn_node("Main", GROUP_INPUT, "Group Input", [-400.0, 0.0]).unwrap();
    let curve = scene
        .spawn_node("Main", "ShaderNodeFloatCurve", "Curve", [-200.0, -100.0])
        .unwrap();
    scene.add_curve_point("Main", curve, [0.5, 0.25]).unwrap();
    let combine = scene
        .spawn_node("Main", "ShaderNodeCombineXYZ", "Combine XYZ", [-100.0, -200.0])
        .unwrap();
    let position = scene
        .spawn_node("Main", "GeometryNodeSetPosition", "Set Position", [0.0, 0.0])
        .unwrap();
    let instance = scene.spawn_node("Main", GROUP_INSTANCE, "Leaf Group", [200.0, 100.0]).unwrap();
    scene
        .set_node_attribute("Main", instance, NodeAttribute::NodeTree(Some("Leaf".into())))
        .unwrap();
    let cube = scene.spawn_node("Main", "GeometryNodeMeshCube", "Cube", [200.0, -200.0]).unwrap();
    let join = scene
        .spawn_node("Main", "GeometryNodeJoinGeometry", "Join Geometry", [400.0, 0.0])
        .unwrap();
    let output = scene.spawn_node("Main", GROUP_OUTPUT, "Group Output", [600.0, 0.0]).unwrap();

    scene.link("Main", input, 1, curve, 0).unwrap();
    scene.link("Main", curve, 0, combine, 2).unwrap();
    scene.link("Main", input, 0, position, 0).unwrap();
    scene.link("Main", combine, 0, position, 3).unwrap();
    scene.link("Main", position, 0, instance, 0).unwrap();
    scene.link("Main", instance, 0, join, 0).unwrap();
    scene.link("Main", cube, 0, join, 0).unwrap();
    scene.link("Main", join, 0, output, 0).unwrap();

    scene.add_object("Plane");
    scene.add_node_modifier("Plane").unwrap();
    scene.set_modifier_graph("Plane", "Main").unwrap();
    scene
}
