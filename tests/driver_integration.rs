//! Integration tests for metadata loading.
//!
//! These tests write relation documents to disk, read them back through
//! `Document::read`, and check the compiled metadata end to end.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use relmeta::core::config::Config;
use relmeta::core::document::{Document, DocumentFormat};
use relmeta::core::expression::{
    CompiledExpression, Evaluable, ExpressionChecker, ExpressionCompiler, ExpressionError,
};
use relmeta::core::metadata::{EmbeddedValue, Href, Relation};
use relmeta::core::types::{ProviderRef, RelationName, TypeName};
use relmeta::driver::{ClassRef, DriverError, MetadataDriver};
use relmeta::provider::{ChainProvider, NullProvider, ProviderError, StaticProvider};

// =============================================================================
// Test Fixtures
// =============================================================================

const USER_YAML: &str = r#"
App\Entity\User:
  relations:
    - rel: self
      href:
        route: user_get
        parameters:
          id: "@id"
        absolute: true
    - rel: avatar
      href: "http://example.com"
    - rel: posts
      embedded:
        content: this.items
    - rel: manager
      href: object.manager.url
      embedded:
        content: object.manager
        xmlElementName: boss
        exclusion:
          groups: [admin]
      attributes:
        method: GET
      exclusion:
        groups: [admin]
        max_depth: 2
        exclude_if: user.isGuest
  relation_providers:
    - paginator
"#;

/// A directory holding relation documents.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write document");
        path
    }

    fn read(&self, name: &str, contents: &str) -> Document {
        let path = self.write(name, contents);
        Document::read(&path, DocumentFormat::Yaml).expect("failed to read document")
    }
}

fn expr(source: &str) -> Evaluable {
    Evaluable::Expression(CompiledExpression::new(source, source))
}

fn rel(name: &str) -> Relation {
    Relation::builder(RelationName::new(name).unwrap()).build()
}

fn user() -> TypeName {
    TypeName::new("App\\Entity\\User").unwrap()
}

fn paginator() -> StaticProvider {
    StaticProvider::new().with("paginator", vec![rel("next"), rel("previous")])
}

fn driver_with(provider: StaticProvider) -> MetadataDriver {
    MetadataDriver::new(ExpressionChecker::default(), Arc::new(provider))
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn loads_full_document() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let class = ClassRef::new(user()).with_definition("src/Entity/User.php");

    let metadata = driver_with(paginator()).load(&class, &doc).unwrap();

    let names: Vec<_> = metadata
        .relations()
        .iter()
        .map(|r| r.name().as_str())
        .collect();
    assert_eq!(
        names,
        vec!["self", "avatar", "posts", "manager", "next", "previous"]
    );
    assert_eq!(
        metadata.file_resources(),
        &[
            fixture.dir.path().join("User.yml"),
            PathBuf::from("src/Entity/User.php")
        ]
    );
}

#[test]
fn route_href() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let metadata = driver_with(paginator()).load_type(&user(), &doc).unwrap();

    let route = metadata.relations()[0].href().unwrap().as_route().unwrap();
    assert_eq!(route.name, expr("user_get"));
    assert_eq!(route.parameters.len(), 1);
    assert_eq!(route.parameters["id"], expr("@id"));
    assert_eq!(route.absolute, Evaluable::literal(true));
    assert!(route.generator.is_none());
}

#[test]
fn scalar_href_is_expression() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let metadata = driver_with(paginator()).load_type(&user(), &doc).unwrap();

    assert_eq!(
        metadata.relations()[1].href(),
        Some(&Href::Value(expr("http://example.com")))
    );
}

#[test]
fn structured_embedded() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let metadata = driver_with(paginator()).load_type(&user(), &doc).unwrap();

    let posts = metadata.relations()[2].embedded().unwrap().as_embedded().unwrap();
    assert_eq!(posts.content, expr("this.items"));
    assert!(posts.xml_element_name.is_none());
    assert!(posts.exclusion.is_none());
    assert!(metadata.relations()[2].href().is_none());

    let manager = metadata.relations()[3].embedded().unwrap().as_embedded().unwrap();
    assert_eq!(manager.xml_element_name, Some(expr("boss")));
    assert_eq!(
        manager.exclusion.as_ref().unwrap().groups,
        Some(vec!["admin".to_string()])
    );
}

#[test]
fn relation_exclusion_and_attributes() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let metadata = driver_with(paginator()).load_type(&user(), &doc).unwrap();

    let manager = &metadata.relations()[3];
    assert_eq!(manager.attributes()["method"], Evaluable::literal("GET"));

    let exclusion = manager.exclusion().unwrap();
    assert_eq!(exclusion.groups, Some(vec!["admin".to_string()]));
    assert!(exclusion.since_version.is_none());
    assert!(exclusion.until_version.is_none());
    assert_eq!(exclusion.max_depth, Some(2));
    assert_eq!(exclusion.exclude_if, Some(expr("user.isGuest")));
}

#[test]
fn provider_receives_type_name() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let provider = paginator();
    driver_with(provider.clone()).load_type(&user(), &doc).unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].reference, ProviderRef::new("paginator").unwrap());
    assert_eq!(calls[0].type_name, user());
}

#[test]
fn chained_providers_contribute_contiguous_batches() {
    let fixture = Fixture::new();
    let doc = fixture.read(
        "Post.yml",
        "Post:\n  relations: [{rel: self}]\n  relation_providers: [a, b]\n",
    );
    let chain = ChainProvider::new(vec![
        Arc::new(StaticProvider::new().with("a", vec![rel("a1"), rel("a2")])),
        Arc::new(StaticProvider::new().with("b", vec![rel("b1")])),
    ]);
    let driver = MetadataDriver::new(ExpressionChecker::default(), Arc::new(chain));

    let metadata = driver
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap();
    let names: Vec<_> = metadata
        .relations()
        .iter()
        .map(|r| r.name().as_str())
        .collect();
    assert_eq!(names, vec!["self", "a1", "a2", "b1"]);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_type_fails() {
    let fixture = Fixture::new();
    let doc = fixture.read("User.yml", USER_YAML);
    let err = MetadataDriver::new(ExpressionChecker::default(), Arc::new(NullProvider))
        .load_type(&TypeName::new("App\\Entity\\Post").unwrap(), &doc)
        .unwrap_err();

    match &err {
        DriverError::MissingMetadata {
            type_name,
            document,
        } => {
            assert_eq!(type_name.as_str(), "App\\Entity\\Post");
            assert_eq!(document, &fixture.dir.path().join("User.yml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_rel_fails() {
    let fixture = Fixture::new();
    let doc = fixture.read("Post.yml", "Post:\n  relations:\n    - href: /posts\n");
    let err = driver_with(StaticProvider::new())
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap_err();
    assert!(matches!(err, DriverError::MalformedRelation { index: 0, .. }));
}

#[test]
fn embedded_without_content_fails() {
    let fixture = Fixture::new();
    let doc = fixture.read(
        "Post.yml",
        "Post:\n  relations:\n    - rel: items\n      embedded: {xmlElementName: item}\n",
    );
    let err = driver_with(StaticProvider::new())
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap_err();
    assert!(matches!(err, DriverError::MalformedRelation { .. }));
}

#[test]
fn invalid_yaml_fails() {
    let fixture = Fixture::new();
    let doc = fixture.read("Post.yml", "Post: {relations: [\n");
    let err = driver_with(StaticProvider::new())
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap_err();
    assert!(matches!(err, DriverError::Parse(_)));
}

#[test]
fn compiler_errors_propagate_unchanged() {
    struct Refusing;
    impl ExpressionCompiler for Refusing {
        fn compile(&self, source: &str) -> Result<CompiledExpression, ExpressionError> {
            Err(ExpressionError::Rejected {
                expression: source.to_string(),
                message: "no evaluator".into(),
            })
        }
    }

    let fixture = Fixture::new();
    let doc = fixture.read("Post.yml", "Post:\n  relations:\n    - rel: self\n      href: x\n");
    let driver = MetadataDriver::new(ExpressionChecker::new(Arc::new(Refusing)), Arc::new(NullProvider));
    let err = driver
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap_err();

    match err {
        DriverError::Expression { source, .. } => assert_eq!(
            source,
            ExpressionError::Rejected {
                expression: "x".into(),
                message: "no evaluator".into(),
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn provider_errors_propagate_unchanged() {
    let fixture = Fixture::new();
    let doc = fixture.read("Post.yml", "Post:\n  relation_providers: [broken]\n");
    let broken = |reference: &ProviderRef,
                  type_name: &TypeName|
     -> Result<Vec<Relation>, ProviderError> {
        Err(ProviderError::Failed {
            provider: reference.to_string(),
            type_name: type_name.to_string(),
            message: "service unavailable".into(),
        })
    };
    let driver = MetadataDriver::new(ExpressionChecker::default(), Arc::new(broken));
    let err = driver
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap_err();
    assert!(err.to_string().contains("service unavailable"));
}

// =============================================================================
// Formats and configuration
// =============================================================================

#[test]
fn json_document_matches_yaml() {
    let fixture = Fixture::new();
    let yaml = fixture.read("User.yml", USER_YAML);
    let as_json = serde_json::to_string(&yaml.parse().unwrap()).unwrap();
    let json = fixture.read("User.json", &as_json);
    assert_eq!(json.format(), DocumentFormat::Json);

    let driver = driver_with(paginator());
    let from_yaml = driver.load_type(&user(), &yaml).unwrap();
    let from_json = driver.load_type(&user(), &json).unwrap();
    assert_eq!(from_yaml.relations(), from_json.relations());
}

#[test]
fn wrapped_syntax_from_config() {
    let fixture = Fixture::new();
    let config_path = fixture.write("relmeta.toml", "expression_syntax = \"wrapped\"\n");
    let config = Config::load(Some(&config_path)).unwrap();

    let doc = fixture.read(
        "Post.yml",
        "Post:\n  relations:\n    - rel: self\n      href: /posts/1\n    - rel: next\n      href: expr(object.next)\n",
    );
    let driver = MetadataDriver::from_config(&config, Arc::new(NullProvider));
    let metadata = driver
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap();

    assert_eq!(
        metadata.relations()[0].href(),
        Some(&Href::Value(Evaluable::literal("/posts/1")))
    );
    assert_eq!(
        metadata.relations()[1].href(),
        Some(&Href::Value(expr("object.next")))
    );
}

#[test]
fn shared_relation_template_is_merged() {
    let fixture = Fixture::new();
    let doc = fixture.read(
        "Post.yml",
        r#"
Post:
  relations:
    - &linked
      rel: self
      href: { route: post_get, parameters: { id: object.id } }
      exclusion: { groups: [api] }
    - <<: *linked
      rel: canonical
"#,
    );
    let metadata = driver_with(StaticProvider::new())
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap();

    let canonical = &metadata.relations()[1];
    assert_eq!(canonical.name().as_str(), "canonical");
    let route = canonical.href().unwrap().as_route().unwrap();
    assert_eq!(route.name, expr("post_get"));
    assert_eq!(route.parameters["id"], expr("object.id"));
    assert_eq!(
        canonical.exclusion().unwrap().groups,
        Some(vec!["api".to_string()])
    );
}

#[test]
fn scalar_embedded_is_not_wrapped() {
    let fixture = Fixture::new();
    let doc = fixture.read("Post.yml", "Post:\n  relations:\n    - rel: author\n      embedded: object.author\n");
    let metadata = driver_with(StaticProvider::new())
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap();
    assert_eq!(
        metadata.relations()[0].embedded(),
        Some(&EmbeddedValue::Value(expr("object.author")))
    );
}

#[test]
fn metadata_serializes_for_inspection() {
    let fixture = Fixture::new();
    let doc = fixture.read("Post.yml", "Post:\n  relations:\n    - rel: self\n      href: /posts\n");
    let metadata = driver_with(StaticProvider::new())
        .load_type(&TypeName::new("Post").unwrap(), &doc)
        .unwrap();

    let value = serde_json::to_value(&metadata).unwrap();
    assert_eq!(value["name"], json!("Post"));
    assert_eq!(value["relations"][0]["name"], json!("self"));
    assert_eq!(
        value["relations"][0]["href"]["value"]["kind"],
        json!("expression")
    );
}
