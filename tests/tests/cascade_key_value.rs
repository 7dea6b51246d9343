use cascade::{CascadeConfig, Filter, ModelDef, Record, StrategyKind};
use tests::DbTest;

#[tokio::test]
async fn scoped_deletion_falls_back_to_delete_by_key() {
    let mut test = DbTest::key_value();
    let db = test
        .setup(
            ModelDef::new("P")
                .has_many("items", "Item", "p_id")
                .cascade(CascadeConfig::new().relation("items")),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    let items = p.association("items").unwrap();
    assert!(!items.supports_destroy_all());
    assert!(items.destroy_all().await.is_err());

    for _ in 0..3 {
        items.create(Record::new()).await.unwrap();
    }
    let other = db.create("P", Record::new()).await.unwrap();
    other.association("items").unwrap().create(Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();
    let relation = outcome.relation("items").unwrap();
    assert_eq!(relation.strategy, Some(StrategyKind::Scoped));
    assert_eq!(relation.status.deleted_count(), 3);

    let log = test.log();
    assert_eq!(log.filter_deletes_on("Item"), 0);
    assert_eq!(log.key_deletes_on("Item"), 1);
    assert_eq!(db.find("Item", Filter::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn no_matching_rows_issues_no_delete() {
    let mut test = DbTest::key_value();
    let db = test
        .setup(
            ModelDef::new("P")
                .has_many("items", "Item", "p_id")
                .cascade(CascadeConfig::new().relation("items")),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    let outcome = p.destroy().await.unwrap();

    assert_eq!(outcome.deleted(), 0);
    assert_eq!(test.log().deletes_on("Item"), 0);
}
