const SHADERS: &[&str] = &["src/layers/renderer/shader.wgsl"];

fn main() {
    for path in SHADERS {
        println!("cargo:rerun-if-changed={}", path);
        validate_shader(path);
    }
}

/// Parse and validate a WGSL file so shader mistakes fail the build instead of
/// pipeline creation at runtime
fn validate_shader(path: &str) {
    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read shader file {}: {}", path, e));

    let module = match naga::front::wgsl::parse_str(&source) {
        Ok(module) => module,
        Err(e) => panic!("Shader parsing failed for {}:\n{}", path, e.emit_to_string(&source)),
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );

    if let Err(e) = validator.validate(&module) {
        panic!("Shader validation failed for {}:\n{:?}", path, e);
    }
}
