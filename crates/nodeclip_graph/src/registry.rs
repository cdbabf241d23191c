// SPDX-License-Identifier: MIT OR Apache-2.0
//! Name-based type inference.
//!
//! Nodes keep the name their type gives them unless a user renames them, so
//! a node's name usually tells its type tag. [`resolve_type_tag`] looks the
//! name up by prefix (which also covers host suffixes like `Cube.001`), and
//! [`minimal_type_annotation`] decides whether a tag has to be written out.

/// Type tag of the graph input node
pub const GROUP_INPUT: &str = "NodeGroupInput";
/// Type tag of the graph output node
pub const GROUP_OUTPUT: &str = "NodeGroupOutput";
/// Type tag of subgraph instance nodes
pub const GROUP_INSTANCE: &str = "GeometryNodeGroup";

/// No registry entry matches a node name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown node type name: {0}")]
pub struct UnknownTypeName(pub String);

/// Resolve the type tag of the first entry whose canonical name is a prefix
/// of `name`.
pub fn resolve_type_tag(name: &str) -> Result<&'static str, UnknownTypeName> {
    TYPE_NAMES
        .iter()
        .find(|(canonical, _)| name.starts_with(canonical))
        .map(|(_, tag)| *tag)
        .ok_or_else(|| UnknownTypeName(name.to_string()))
}

/// Return the tag to write for a node, or `None` when its name already
/// resolves to exactly that tag.
pub fn minimal_type_annotation<'a>(name: &str, type_tag: &'a str) -> Option<&'a str> {
    match resolve_type_tag(name) {
        Ok(resolved) if resolved == type_tag => None,
        _ => Some(type_tag),
    }
}

/// Canonical name registered for a type tag
pub fn canonical_name(type_tag: &str) -> Option<&'static str> {
    TYPE_NAMES
        .iter()
        .find(|(_, tag)| *tag == type_tag)
        .map(|(canonical, _)| *canonical)
}

/// Canonical node names and their type tags.
///
/// An entry never follows an entry whose name is a proper prefix of its own,
/// so the first prefix match is always the most specific one.
pub const TYPE_NAMES: &[(&str, &str)] = &[
    ("White Noise Texture", "ShaderNodeTexWhiteNoise"),
    ("Wave Texture", "ShaderNodeTexWave"),
    ("Voronoi Texture", "ShaderNodeTexVoronoi"),
    ("Volume to Mesh", "GeometryNodeVolumeToMesh"),
    ("Volume Cube", "GeometryNodeVolumeCube"),
    ("Viewer", "GeometryNodeViewer"),
    ("Vertex of Corner", "GeometryNodeVertexOfCorner"),
    ("Vertex Neighbors", "GeometryNodeInputMeshVertexNeighbors"),
    ("Vector Rotate", "ShaderNodeVectorRotate"),
    ("Vector Math", "ShaderNodeVectorMath"),
    ("Vector Curves", "ShaderNodeVectorCurve"),
    ("Vector", "FunctionNodeInputVector"),
    ("Value to String", "FunctionNodeValueToString"),
    ("Value", "ShaderNodeValue"),
    ("UV Unwrap", "GeometryNodeUVUnwrap"),
    ("UV Sphere", "GeometryNodeMeshUVSphere"),
    ("Trim Curve", "GeometryNodeTrimCurve"),
    ("Triangulate", "GeometryNodeTriangulate"),
    ("Translate Instances", "GeometryNodeTranslateInstances"),
    ("Transform Geometry", "GeometryNodeTransform"),
    ("Switch", "GeometryNodeSwitch"),
    ("Subdivision Surface", "GeometryNodeSubdivisionSurface"),
    ("Subdivide Mesh", "GeometryNodeSubdivideMesh"),
    ("Subdivide Curve", "GeometryNodeSubdivideCurve"),
    ("String to Curves", "GeometryNodeStringToCurves"),
    ("String Length", "FunctionNodeStringLength"),
    ("String", "FunctionNodeInputString"),
    ("Store Named Attribute", "GeometryNodeStoreNamedAttribute"),
    ("Star", "GeometryNodeCurveStar"),
    ("Split Edges", "GeometryNodeSplitEdges"),
    ("Spline Resolution", "GeometryNodeInputSplineResolution"),
    ("Spline Parameter", "GeometryNodeSplineParameter"),
    ("Spline Length", "GeometryNodeSplineLength"),
    ("Special Characters", "FunctionNodeInputSpecialCharacters"),
    ("Slice String", "FunctionNodeSliceString"),
    ("Simulation Output", "GeometryNodeSimulationOutput"),
    ("Simulation Input", "GeometryNodeSimulationInput"),
    ("Signed Distance", "GeometryNodeInputSignedDistance"),
    ("Shortest Edge Paths", "GeometryNodeInputShortestEdgePaths"),
    ("Set Spline Type", "GeometryNodeCurveSplineType"),
    ("Set Spline Resolution", "GeometryNodeSetSplineResolution"),
    ("Set Spline Cyclic", "GeometryNodeSetSplineCyclic"),
    ("Set Shade Smooth", "GeometryNodeSetShadeSmooth"),
    ("Set Selection", "GeometryNodeToolSetSelection"),
    ("Set Position", "GeometryNodeSetPosition"),
    ("Set Point Radius", "GeometryNodeSetPointRadius"),
    ("Set Material Index", "GeometryNodeSetMaterialIndex"),
    ("Set Material", "GeometryNodeSetMaterial"),
    ("Set ID", "GeometryNodeSetID"),
    ("Set Handle Type", "GeometryNodeCurveSetHandles"),
    ("Set Handle Positions", "GeometryNodeSetCurveHandlePositions"),
    ("Set Face Set", "GeometryNodeToolSetFaceSet"),
    ("Set Curve Tilt", "GeometryNodeSetCurveTilt"),
    ("Set Curve Radius", "GeometryNodeSetCurveRadius"),
    ("Set Curve Normal", "GeometryNodeSetCurveNormal"),
    ("Separate XYZ", "ShaderNodeSeparateXYZ"),
    ("Separate RGB", "ShaderNodeSeparateRGB"),
    ("Separate Geometry", "GeometryNodeSeparateGeometry"),
    ("Separate Components", "GeometryNodeSeparateComponents"),
    ("Separate Color", "FunctionNodeSeparateColor"),
    ("Self Object", "GeometryNodeSelfObject"),
    ("Selection", "GeometryNodeToolSelection"),
    ("Scene Time", "GeometryNodeInputSceneTime"),
    ("Scale Instances", "GeometryNodeScaleInstances"),
    ("Scale Elements", "GeometryNodeScaleElements"),
    ("Sample Volume", "GeometryNodeSampleVolume"),
    ("Sample UV Surface", "GeometryNodeSampleUVSurface"),
    ("Sample Nearest Surface", "GeometryNodeSampleNearestSurface"),
    ("Sample Nearest", "GeometryNodeSampleNearest"),
    ("Sample Index", "GeometryNodeSampleIndex"),
    ("Sample Curve", "GeometryNodeSampleCurve"),
    ("SDF Volume Sphere", "GeometryNodeSDFVolumeSphere"),
    ("Rotation to Quaternion", "FunctionNodeRotationToQuaternion"),
    ("Rotation to Euler", "FunctionNodeRotationToEuler"),
    ("Rotation to Axis Angle", "FunctionNodeRotationToAxisAngle"),
    ("Rotate Vector", "FunctionNodeRotateVector"),
    ("Rotate Instances", "GeometryNodeRotateInstances"),
    ("Rotate Euler", "FunctionNodeRotateEuler"),
    ("Reverse Curve", "GeometryNodeReverseCurve"),
    ("Resample Curve", "GeometryNodeResampleCurve"),
    ("Reroute", "NodeReroute"),
    ("Replace String", "FunctionNodeReplaceString"),
    ("Replace Material", "GeometryNodeReplaceMaterial"),
    ("Repeat Output", "GeometryNodeRepeatOutput"),
    ("Repeat Input", "GeometryNodeRepeatInput"),
    ("Remove Named Attribute", "GeometryNodeRemoveAttribute"),
    ("Realize Instances", "GeometryNodeRealizeInstances"),
    ("Raycast", "GeometryNodeRaycast"),
    ("Random Value", "FunctionNodeRandomValue"),
    ("Radius", "GeometryNodeInputRadius"),
    ("RGB Curves", "ShaderNodeRGBCurve"),
    ("Quaternion to Rotation", "FunctionNodeQuaternionToRotation"),
    ("Quadrilateral", "GeometryNodeCurvePrimitiveQuadrilateral"),
    ("Quadratic Bezier", "GeometryNodeCurveQuadraticBezier"),
    ("Position", "GeometryNodeInputPosition"),
    ("Points to Volume", "GeometryNodePointsToVolume"),
    ("Points to Vertices", "GeometryNodePointsToVertices"),
    ("Points to SDF Volume", "GeometryNodePointsToSDFVolume"),
    ("Points to Curves", "GeometryNodePointsToCurves"),
    ("Points of Curve", "GeometryNodePointsOfCurve"),
    ("Points", "GeometryNodePoints"),
    ("Pack UV Islands", "GeometryNodeUVPackIslands"),
    ("Offset SDF Volume", "GeometryNodeOffsetSDFVolume"),
    ("Offset Point in Curve", "GeometryNodeOffsetPointInCurve"),
    ("Offset Corner in Face", "GeometryNodeOffsetCornerInFace"),
    ("Object Info", "GeometryNodeObjectInfo"),
    ("Normal", "GeometryNodeInputNormal"),
    ("Noise Texture", "ShaderNodeTexNoise"),
    ("Named Attribute", "GeometryNodeInputNamedAttribute"),
    ("Musgrave Texture", "ShaderNodeTexMusgrave"),
    ("MixRGB", "ShaderNodeMixRGB"),
    ("Mix", "ShaderNodeMix"),
    ("Mesh to Volume", "GeometryNodeMeshToVolume"),
    ("Mesh to SDF Volume", "GeometryNodeMeshToSDFVolume"),
    ("Mesh to Points", "GeometryNodeMeshToPoints"),
    ("Mesh to Curve", "GeometryNodeMeshToCurve"),
    ("Mesh Line", "GeometryNodeMeshLine"),
    ("Mesh Island", "GeometryNodeInputMeshIsland"),
    ("Mesh Circle", "GeometryNodeMeshCircle"),
    ("Mesh Boolean", "GeometryNodeMeshBoolean"),
    ("Merge by Distance", "GeometryNodeMergeByDistance"),
    ("Mean Filter SDF Volume", "GeometryNodeMeanFilterSDFVolume"),
    ("Math", "ShaderNodeMath"),
    ("Material Selection", "GeometryNodeMaterialSelection"),
    ("Material Index", "GeometryNodeInputMaterialIndex"),
    ("Material", "GeometryNodeInputMaterial"),
    ("Map Range", "ShaderNodeMapRange"),
    ("Magic Texture", "ShaderNodeTexMagic"),
    ("Join Strings", "GeometryNodeStringJoin"),
    ("Join Geometry", "GeometryNodeJoinGeometry"),
    ("Is Viewport", "GeometryNodeIsViewport"),
    ("Is Spline Cyclic", "GeometryNodeInputSplineCyclic"),
    ("Is Face Smooth", "GeometryNodeInputShadeSmooth"),
    ("Is Face Planar", "GeometryNodeInputMeshFaceIsPlanar"),
    ("Is Edge Smooth", "GeometryNodeInputEdgeSmooth"),
    ("Invert Rotation", "FunctionNodeInvertRotation"),
    ("Interpolate Curves", "GeometryNodeInterpolateCurves"),
    ("Integer", "FunctionNodeInputInt"),
    ("Instances to Points", "GeometryNodeInstancesToPoints"),
    ("Instance on Points", "GeometryNodeInstanceOnPoints"),
    ("Instance Scale", "GeometryNodeInputInstanceScale"),
    ("Instance Rotation", "GeometryNodeInputInstanceRotation"),
    ("Index of Nearest", "GeometryNodeIndexOfNearest"),
    ("Index", "GeometryNodeInputIndex"),
    ("Image Texture", "GeometryNodeImageTexture"),
    ("Image Info", "GeometryNodeImageInfo"),
    ("Image", "GeometryNodeInputImage"),
    ("Ico Sphere", "GeometryNodeMeshIcoSphere"),
    ("ID", "GeometryNodeInputID"),
    ("Handle Type Selection", "GeometryNodeCurveHandleTypeSelection"),
    ("Group Output", "NodeGroupOutput"),
    ("Group Input", "NodeGroupInput"),
    ("Grid", "GeometryNodeMeshGrid"),
    ("Gradient Texture", "ShaderNodeTexGradient"),
    ("GeometryNodeGroup", "GeometryNodeGroup"),
    ("Geometry to Instance", "GeometryNodeGeometryToInstance"),
    ("Geometry Proximity", "GeometryNodeProximity"),
    ("Frame", "NodeFrame"),
    ("Float to Integer", "FunctionNodeFloatToInt"),
    ("Float Curve", "ShaderNodeFloatCurve"),
    ("Flip Faces", "GeometryNodeFlipFaces"),
    ("Fillet Curve", "GeometryNodeFilletCurve"),
    ("Fill Curve", "GeometryNodeFillCurve"),
    ("Face of Corner", "GeometryNodeFaceOfCorner"),
    ("Face Set", "GeometryNodeToolFaceSet"),
    ("Face Neighbors", "GeometryNodeInputMeshFaceNeighbors"),
    ("Face Group Boundaries", "GeometryNodeMeshFaceSetBoundaries"),
    ("Face Area", "GeometryNodeInputMeshFaceArea"),
    ("Extrude Mesh", "GeometryNodeExtrudeMesh"),
    ("Evaluate on Domain", "GeometryNodeFieldOnDomain"),
    ("Evaluate at Index", "GeometryNodeFieldAtIndex"),
    ("Euler to Rotation", "FunctionNodeEulerToRotation"),
    ("Endpoint Selection", "GeometryNodeCurveEndpointSelection"),
    ("Edges to Face Groups", "GeometryNodeEdgesToFaceGroups"),
    ("Edges of Vertex", "GeometryNodeEdgesOfVertex"),
    ("Edges of Corner", "GeometryNodeEdgesOfCorner"),
    ("Edge Vertices", "GeometryNodeInputMeshEdgeVertices"),
    ("Edge Paths to Selection", "GeometryNodeEdgePathsToSelection"),
    ("Edge Paths to Curves", "GeometryNodeEdgePathsToCurves"),
    ("Edge Neighbors", "GeometryNodeInputMeshEdgeNeighbors"),
    ("Edge Angle", "GeometryNodeInputMeshEdgeAngle"),
    ("Duplicate Elements", "GeometryNodeDuplicateElements"),
    ("Dual Mesh", "GeometryNodeDualMesh"),
    ("Domain Size", "GeometryNodeAttributeDomainSize"),
    ("Distribute Points on Faces", "GeometryNodeDistributePointsOnFaces"),
    ("Distribute Points in Volume", "GeometryNodeDistributePointsInVolume"),
    ("Delete Geometry", "GeometryNodeDeleteGeometry"),
    ("Deform Curves on Surface", "GeometryNodeDeformCurvesOnSurface"),
    ("Cylinder", "GeometryNodeMeshCylinder"),
    ("Curve to Points", "GeometryNodeCurveToPoints"),
    ("Curve to Mesh", "GeometryNodeCurveToMesh"),
    ("Curve of Point", "GeometryNodeCurveOfPoint"),
    ("Curve Tilt", "GeometryNodeInputCurveTilt"),
    ("Curve Tangent", "GeometryNodeInputTangent"),
    ("Curve Spiral", "GeometryNodeCurveSpiral"),
    ("Curve Line", "GeometryNodeCurvePrimitiveLine"),
    ("Curve Length", "GeometryNodeCurveLength"),
    ("Curve Handle Positions", "GeometryNodeInputCurveHandlePositions"),
    ("Curve Circle", "GeometryNodeCurvePrimitiveCircle"),
    ("Cube", "GeometryNodeMeshCube"),
    ("Corners of Vertex", "GeometryNodeCornersOfVertex"),
    ("Corners of Face", "GeometryNodeCornersOfFace"),
    ("Corners of Edge", "GeometryNodeCornersOfEdge"),
    ("Convex Hull", "GeometryNodeConvexHull"),
    ("Cone", "GeometryNodeMeshCone"),
    ("Compare", "FunctionNodeCompare"),
    ("Combine XYZ", "ShaderNodeCombineXYZ"),
    ("Combine RGB", "ShaderNodeCombineRGB"),
    ("Combine Color", "FunctionNodeCombineColor"),
    ("Color Ramp", "ShaderNodeValToRGB"),
    ("Color", "FunctionNodeInputColor"),
    ("Collection Info", "GeometryNodeCollectionInfo"),
    ("Clamp", "ShaderNodeClamp"),
    ("Checker Texture", "ShaderNodeTexChecker"),
    ("Capture Attribute", "GeometryNodeCaptureAttribute"),
    ("Brick Texture", "ShaderNodeTexBrick"),
    ("Bounding Box", "GeometryNodeBoundBox"),
    ("Boolean Math", "FunctionNodeBooleanMath"),
    ("Boolean", "FunctionNodeInputBool"),
    ("Blur Attribute", "GeometryNodeBlurAttribute"),
    ("Bezier Segment", "GeometryNodeCurvePrimitiveBezierSegment"),
    ("Axis Angle to Rotation", "FunctionNodeAxisAngleToRotation"),
    ("Attribute Statistic", "GeometryNodeAttributeStatistic"),
    ("Arc", "GeometryNodeCurveArc"),
    ("Align Euler to Vector", "FunctionNodeAlignEulerToVector"),
    ("Accumulate Field", "GeometryNodeAccumulateField"),
    ("3D Cursor", "GeometryNodeTool3DCursor"),
];
