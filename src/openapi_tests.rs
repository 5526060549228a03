#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("FetchDataResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));

        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_paths_are_documented() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.paths.paths.contains_key("/api/fetchData"));
        assert!(openapi.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = error_response_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert_eq!(properties.len(), 1);
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_fetch_data_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let schema = components.schemas.get("FetchDataResponse").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = schema {
            assert!(obj.properties.contains_key("data"));
            assert!(obj.required.contains(&"data".to_string()));
        } else {
            panic!("FetchDataResponse should be an object schema");
        }
    }
}
