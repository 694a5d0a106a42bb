// SPDX-License-Identifier: GPL-3.0-only

//! WGSL shader validation
//!
//! The kernel only compiles on the GPU at runtime; validating it with
//! naga here catches shader breakage without needing a device.

use depth_view::shaders::depth_view::{RANGE_EPSILON_M, VISUALIZE_SHADER};

#[test]
fn test_visualize_shader_parses_and_validates() {
    let module = naga::front::wgsl::parse_str(VISUALIZE_SHADER).expect("WGSL parse failed");

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("WGSL validation failed");
}

#[test]
fn test_shader_bindings_present() {
    // The Rust side binds depth texture, output texture, uniforms at 0-2
    assert!(VISUALIZE_SHADER.contains("@group(0) @binding(0)"));
    assert!(VISUALIZE_SHADER.contains("@group(0) @binding(1)"));
    assert!(VISUALIZE_SHADER.contains("@group(0) @binding(2)"));
    assert!(VISUALIZE_SHADER.contains("@workgroup_size(16, 16)"));
}

#[test]
fn test_shader_epsilon_matches_cpu_constant() {
    // Both sides of the mapping must clamp the denominator identically
    assert!(VISUALIZE_SHADER.contains("const RANGE_EPSILON: f32 = 1e-4;"));
    assert_eq!(RANGE_EPSILON_M, 1e-4);
}
