use cascade::{CascadeConfig, Filter, ModelDef, Record, RelationOptions};
use tests::DbTest;

#[tokio::test]
async fn unknown_relation_is_a_non_fatal_failure() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            ModelDef::new("Book")
                .has_many("chapters", "Chapter", "book_id")
                .cascade(CascadeConfig::new().relation("pages").relation("chapters")),
            &["Chapter"],
        )
        .await;

    let book = db.create("Book", Record::new()).await.unwrap();
    book.association("chapters").unwrap().create(Record::new()).await.unwrap();

    let outcome = book.destroy().await.unwrap();

    let (relation, err) = outcome.failures().next().unwrap();
    assert_eq!(relation, "pages");
    assert!(err.is_relation_not_found());
    assert!(err.is_configuration_error());
    assert_eq!(err.to_string(), "relation `pages` not found for model `Book`");

    assert_eq!(outcome.relation("chapters").unwrap().status.deleted_count(), 1);
    assert!(db.find("Chapter", Filter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_relation_with_fail_on_err_rejects() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            ModelDef::new("Book").cascade(
                CascadeConfig::new()
                    .relation_with("pages", RelationOptions::new().fail_on_err(true)),
            ),
            &[],
        )
        .await;

    let book = db.create("Book", Record::new()).await.unwrap();
    let err = book.destroy().await.unwrap_err();

    assert_eq!(err.cascade_relation(), Some("pages"));
    assert!(err.root().is_relation_not_found());
    assert_eq!(
        err.to_string(),
        "cascade delete of relation `pages` failed: relation `pages` not found for model `Book`"
    );
    assert!(book.reload().await.unwrap().is_some());
}
