use cascade::{CascadeConfig, ModelDef, Record, StrategyKind};
use tests::DbTest;

#[tokio::test]
async fn deletes_the_child() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            ModelDef::new("P")
                .has_one("child", "Child", "p_id")
                .cascade(CascadeConfig::new().relation("child")),
            &["Child"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    let child = p
        .association("child")
        .unwrap()
        .create(Record::new().with("name", "only"))
        .await
        .unwrap();

    assert_eq!(child.get("p_id"), p.id());
    assert_eq!(
        p.association("child").unwrap().get().await.unwrap().unwrap().id(),
        child.id()
    );

    let outcome = p.destroy().await.unwrap();
    let relation = outcome.relation("child").unwrap();
    assert_eq!(relation.strategy, Some(StrategyKind::Direct));
    assert_eq!(relation.status.deleted_count(), 1);

    assert!(child.reload().await.unwrap().is_none());
    assert!(db.get("Child", child.id().unwrap()).await.unwrap().is_none());
    assert_eq!(test.log().deletes_on("P"), 1);
}

#[tokio::test]
async fn models_without_cascade_delete_only_themselves() {
    let mut test = DbTest::new();
    let db = test
        .setup(ModelDef::new("P").has_one("child", "Child", "p_id"), &["Child"])
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    let child = p.association("child").unwrap().create(Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();
    assert!(outcome.is_noop());

    assert!(p.reload().await.unwrap().is_none());
    assert!(child.reload().await.unwrap().is_some());
    assert_eq!(test.log().deletes_on("Child"), 0);
}
