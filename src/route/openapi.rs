//! Atajos para armar documentación OpenAPI con esquemas frecuentes.

use super::ApiDocumentation;
use serde_json::json;

/// Esquema de respuesta exitosa: `{success, message}`
pub fn success_response_schema(description: &str) -> String {
    json!({
        "type": "object",
        "properties": {
            "success": {
                "type": "boolean",
                "description": "Whether the operation was successful",
                "example": true
            },
            "message": {
                "type": "string",
                "description": description,
                "example": "Operation successful"
            }
        },
        "required": ["success"]
    })
    .to_string()
}

/// Esquema de respuesta de error: `{success, error}`
pub fn error_response_schema(description: &str) -> String {
    json!({
        "type": "object",
        "properties": {
            "success": {
                "type": "boolean",
                "description": "Whether the operation was successful",
                "example": false
            },
            "error": {
                "type": "string",
                "description": description,
                "example": "Operation failed"
            }
        },
        "required": ["success", "error"]
    })
    .to_string()
}

/// Esquema de lista: `{items, total}`
pub fn list_response_schema(item_description: &str) -> String {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": {},
                "description": format!("List of {}", item_description)
            },
            "total": {
                "type": "integer",
                "description": "Total number of items"
            }
        },
        "required": ["items", "total"]
    })
    .to_string()
}

/// Parámetro de path obligatorio de tipo string
pub fn id_parameter(name: &str, description: &str) -> String {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": {"type": "string"},
        "description": description
    })
    .to_string()
}

/// Genera un operation id: método + primera letra del recurso + resto en minúsculas
///
/// # Ejemplo
/// ```
/// use web_platform_core::route::openapi::generate_operation_id;
///
/// assert_eq!(generate_operation_id("get", "Sensors"), "getSensors");
/// assert_eq!(generate_operation_id("post", "WiFiCONFIG"), "postWificonfig");
/// ```
pub fn generate_operation_id(method: &str, resource: &str) -> String {
    let mut chars = resource.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", method, first, chars.as_str().to_ascii_lowercase()),
        None => method.to_string(),
    }
}

/// Documentación con el esquema de respuesta exitosa ya incluido
pub fn with_success_response(
    summary: &str,
    description: &str,
    operation_id: &str,
    tags: &[&str],
    response_description: &str,
) -> ApiDocumentation {
    ApiDocumentation::new(summary, description, operation_id)
        .with_tags(tags)
        .with_response_schema(&success_response_schema(response_description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(schema: &str) -> Value {
        serde_json::from_str(schema).unwrap()
    }

    #[test]
    fn test_success_schema() {
        let schema = parse(&success_response_schema("Config saved"));
        assert_eq!(schema["properties"]["message"]["description"], "Config saved");
        assert_eq!(schema["required"][0], "success");
    }

    #[test]
    fn test_error_schema_escapes_description() {
        let schema = parse(&error_response_schema(r#"say "no""#));
        assert_eq!(schema["properties"]["error"]["description"], r#"say "no""#);
        assert_eq!(schema["required"][1], "error");
    }

    #[test]
    fn test_list_schema() {
        let schema = parse(&list_response_schema("sensors"));
        assert_eq!(schema["properties"]["items"]["description"], "List of sensors");
    }

    #[test]
    fn test_id_parameter() {
        let param = parse(&id_parameter("id", "Sensor id"));
        assert_eq!(param["name"], "id");
        assert_eq!(param["in"], "path");
        assert_eq!(param["required"], true);
    }

    #[test]
    fn test_generate_operation_id() {
        assert_eq!(generate_operation_id("get", "status"), "getstatus");
        assert_eq!(generate_operation_id("delete", "User"), "deleteUser");
        assert_eq!(generate_operation_id("get", ""), "get");
    }

    #[test]
    fn test_with_success_response() {
        let docs = with_success_response("Save", "Guarda", "postSave", &["config"], "Saved");

        assert_eq!(docs.summary(), "Save");
        assert_eq!(docs.tags_string(), "config");
        assert!(docs.response_schema().contains("Saved"));
    }
}
