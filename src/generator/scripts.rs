//! Integration script export: a bash curl script and a Postman v2.1
//! collection for an entity's REST endpoints.

use std::fmt;
use std::str::FromStr;

use askama::Template;
use serde::Serialize;
use serde_json::{json, Value};

use super::naming::EntityDescriptor;
use super::operations::NAME_MIN_LEN;
use super::templates::finish;
use crate::error::{GenerateError, GenerateResult};

const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    HappyPath,
    ValidationErrors,
    NotFound,
    Unauthorized,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::HappyPath,
        Scenario::ValidationErrors,
        Scenario::NotFound,
        Scenario::Unauthorized,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Scenario::HappyPath => "happy_path",
            Scenario::ValidationErrors => "validation_errors",
            Scenario::NotFound => "not_found",
            Scenario::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str() == key)
            .ok_or_else(|| {
                GenerateError::contract(format!(
                    "unknown scenario '{s}' (expected happy_path, validation_errors, not_found or unauthorized)"
                ))
            })
    }
}

/// One REST endpoint of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    /// Route with an `:id` placeholder where a key is expected
    pub path: String,
    pub description: String,
}

impl Endpoint {
    fn new(method: &'static str, path: String, description: String) -> Self {
        Endpoint {
            method,
            path,
            description,
        }
    }

    fn has_body(&self) -> bool {
        matches!(self.method, "POST" | "PUT")
    }

    fn is_list(&self) -> bool {
        self.method == "GET" && !self.path.contains(":id")
    }
}

/// POST, list GET, GET by id, PUT and DELETE on `/{entity}s`.
pub fn default_endpoints(entity: &EntityDescriptor) -> Vec<Endpoint> {
    let base = format!("/{}", entity.plural());
    let item = format!("{base}/:id");
    let name = &entity.name;
    vec![
        Endpoint::new("POST", base.clone(), format!("Create {name}")),
        Endpoint::new("GET", base, format!("List {}", entity.plural())),
        Endpoint::new("GET", item.clone(), format!("Get {name} by id")),
        Endpoint::new("PUT", item.clone(), format!("Update {name}")),
        Endpoint::new("DELETE", item, format!("Delete {name}")),
    ]
}

#[derive(Template)]
#[template(path = "scripts/curl.sh.txt", escape = "none")]
struct CurlTemplate<'a> {
    class: &'a str,
    module: &'a str,
    port: u16,
    entity: &'a str,
    plural: String,
    name_min: usize,
    short_name: String,
    happy_path: bool,
    validation_errors: bool,
    not_found: bool,
    unauthorized: bool,
}

/// Render the bash smoke-test script covering `scenarios`.
pub fn render_curl_script(
    entity: &EntityDescriptor,
    module: &str,
    port: u16,
    scenarios: &[Scenario],
) -> GenerateResult<String> {
    let has = |scenario: Scenario| scenarios.contains(&scenario);
    let template = CurlTemplate {
        class: &entity.class_form,
        module,
        port,
        entity: &entity.name,
        plural: entity.plural(),
        name_min: NAME_MIN_LEN,
        short_name: "x".repeat(NAME_MIN_LEN.saturating_sub(1)),
        happy_path: has(Scenario::HappyPath),
        validation_errors: has(Scenario::ValidationErrors),
        not_found: has(Scenario::NotFound),
        unauthorized: has(Scenario::Unauthorized),
    };
    Ok(finish(template.render()?))
}

fn postman_item(entity: &EntityDescriptor, endpoint: &Endpoint) -> Value {
    let id_var = format!("{{{{{}_id}}}}", entity.name);
    let path = endpoint.path.replace(":id", &id_var);
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    let mut url = json!({
        "raw": format!("{{{{base_url}}}}{path}"),
        "host": ["{{base_url}}"],
        "path": segments,
    });
    if endpoint.is_list() {
        url["raw"] = Value::String(format!(
            "{{{{base_url}}}}{path}?page=1&page_size=10&sort_by=created_at&sort_dir=desc"
        ));
        url["query"] = json!([
            { "key": "page", "value": "1" },
            { "key": "page_size", "value": "10" },
            { "key": "sort_by", "value": "created_at" },
            { "key": "sort_dir", "value": "desc" },
        ]);
    }

    let mut headers = vec![json!({ "key": "X-Tenant-ID", "value": "{{tenant_id}}" })];
    if endpoint.has_body() {
        headers.push(json!({ "key": "Content-Type", "value": "application/json" }));
    }

    let mut request = json!({
        "method": endpoint.method,
        "header": headers,
        "url": url,
    });
    if endpoint.has_body() {
        let body = if endpoint.method == "POST" {
            json!({ "name": format!("Test {}", entity.class_form) })
        } else {
            json!({ "name": format!("Updated {}", entity.class_form), "active": true })
        };
        let raw = serde_json::to_string_pretty(&body).unwrap_or_default();
        request["body"] = json!({
            "mode": "raw",
            "raw": raw,
            "options": { "raw": { "language": "json" } },
        });
    }

    let mut item = json!({
        "name": endpoint.description,
        "request": request,
    });
    if endpoint.method == "POST" {
        item["event"] = json!([{
            "listen": "test",
            "script": {
                "type": "text/javascript",
                "exec": [
                    "pm.test(\"Status code is 201\", function () {",
                    "    pm.response.to.have.status(201);",
                    "});",
                    "const body = pm.response.json();",
                    format!("pm.collectionVariables.set(\"{}_id\", body.id);", entity.name),
                ],
            },
        }]);
    }
    item
}

/// Build the Postman v2.1 collection for `endpoints`.
pub fn postman_collection(
    service: &str,
    module: &str,
    entity: &EntityDescriptor,
    port: u16,
    endpoints: &[Endpoint],
) -> Value {
    let items: Vec<Value> = endpoints.iter().map(|e| postman_item(entity, e)).collect();
    json!({
        "info": {
            "name": format!("{service} - {} API", entity.class_form),
            "description": format!("Integration requests for the {module} module"),
            "schema": POSTMAN_SCHEMA,
        },
        "auth": {
            "type": "bearer",
            "bearer": [{ "key": "token", "value": "{{jwt_token}}", "type": "string" }],
        },
        "variable": [
            { "key": "base_url", "value": format!("http://localhost:{port}") },
            { "key": "jwt_token", "value": "" },
            { "key": "tenant_id", "value": "test-tenant-id" },
            { "key": format!("{}_id", entity.name), "value": "" },
        ],
        "item": items,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn product() -> EntityDescriptor {
        EntityDescriptor::derive("product")
    }

    #[test]
    fn default_endpoints_cover_crud() {
        let endpoints = default_endpoints(&product());
        let routes: Vec<(&str, &str)> = endpoints
            .iter()
            .map(|e| (e.method, e.path.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("POST", "/products"),
                ("GET", "/products"),
                ("GET", "/products/:id"),
                ("PUT", "/products/:id"),
                ("DELETE", "/products/:id"),
            ]
        );
    }

    #[test]
    fn curl_script_only_contains_requested_scenarios() {
        let script = render_curl_script(&product(), "catalog", 8090, &[Scenario::NotFound]).unwrap();
        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("http://localhost:8090"));
        assert!(script.contains("NOT FOUND: get an unknown id"));
        assert!(!script.contains("HAPPY PATH"));
        assert!(!script.contains("UNAUTHORIZED"));
    }

    #[test]
    fn curl_script_uses_a_name_below_the_minimum() {
        let script =
            render_curl_script(&product(), "catalog", 8080, &[Scenario::ValidationErrors]).unwrap();
        assert!(script.contains("{\"name\": \"xx\"}"));
    }

    #[test]
    fn postman_collection_substitutes_variables() {
        let entity = product();
        let collection = postman_collection(
            "saas-mt-pim-service",
            "catalog",
            &entity,
            8090,
            &default_endpoints(&entity),
        );
        assert_eq!(collection["info"]["schema"], POSTMAN_SCHEMA);
        assert_eq!(collection["variable"][0]["value"], "http://localhost:8090");
        assert_eq!(collection["variable"][3]["key"], "product_id");

        let items = collection["item"].as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(
            items[2]["request"]["url"]["raw"],
            "{{base_url}}/products/{{product_id}}"
        );
        assert_eq!(items[1]["request"]["url"]["query"][2]["value"], "created_at");
        assert!(items[0]["request"]["body"]["raw"].as_str().unwrap().contains("Test Product"));
        assert!(items[0]["event"][0]["script"]["exec"][1]
            .as_str()
            .unwrap()
            .contains("201"));
        assert!(items[4]["request"].get("body").is_none());
        assert!(items[4].get("event").is_none());
    }

    #[test]
    fn scenario_parsing_accepts_dashes() {
        assert_eq!("not-found".parse::<Scenario>().unwrap(), Scenario::NotFound);
        assert!("chaos".parse::<Scenario>().is_err());
    }
}
