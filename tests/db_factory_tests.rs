mod support;

use carehome_rust::db::{RepositoryBuilder, RepositoryFactory, RepositoryType, StaffRepository};
use support::with_scoped_env;

#[test]
fn test_repository_type_from_env_default() {
    with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_explicit() {
    with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_invalid_falls_back() {
    with_scoped_env(&[("REPOSITORY_TYPE", Some("oracle"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[tokio::test]
async fn test_factory_from_env() {
    let repo = with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        RepositoryFactory::from_env().unwrap()
    });
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_factory_from_config_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[repository]
type = "local"
"#
    )
    .unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).unwrap();
    assert!(repo.health_check().await.unwrap());

    let repo = RepositoryBuilder::new()
        .from_config_file(file.path())
        .unwrap()
        .build()
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_factory_rejects_bad_config_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[repository]
type = "postgres"
"#
    )
    .unwrap();

    assert!(RepositoryFactory::from_config_file(file.path()).is_err());
}
