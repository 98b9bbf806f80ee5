use super::document::SwaggerSpec;

/// Load a Swagger document from a YAML or JSON file, keyed by extension.
pub fn load_spec(file_path: &str) -> anyhow::Result<SwaggerSpec> {
    let content = std::fs::read_to_string(file_path)?;
    if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        spec_from_yaml(&content)
    } else {
        spec_from_json(&content)
    }
}

/// Parse a Swagger document from YAML source.
pub fn spec_from_yaml(content: &str) -> anyhow::Result<SwaggerSpec> {
    let value: serde_json::Value = serde_yaml::from_str(content)?;
    Ok(SwaggerSpec::new(value)?)
}

/// Parse a Swagger document from JSON source.
pub fn spec_from_json(content: &str) -> anyhow::Result<SwaggerSpec> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(SwaggerSpec::new(value)?)
}
