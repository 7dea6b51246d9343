use cascade::{
    err, CascadeConfig, DeleteInfo, Filter, ModelDef, Record, RelationOptions, SetterCx,
    StrategyKind, Value,
};
use std::sync::{Arc, Mutex};
use tests::DbTest;

fn parent(options: RelationOptions) -> ModelDef {
    ModelDef::new("P")
        .has_many("items", "Item", "p_id")
        .cascade(CascadeConfig::new().relation_with("items", options))
}

#[tokio::test]
async fn setter_intercepts_deletion() {
    let calls = Arc::new(Mutex::new(Vec::<Value>::new()));

    let archive_items = {
        let calls = calls.clone();
        move |cx: SetterCx| {
            let calls = calls.clone();
            async move {
                assert_eq!(cx.relation_name, "items");
                calls.lock().unwrap().push(cx.parent_id);
                Ok::<_, cascade::Error>(DeleteInfo::default())
            }
        }
    };

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(RelationOptions::new().setter("archiveItems"))
                .setter("archiveItems", archive_items),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    for _ in 0..3 {
        p.association("items").unwrap().create(Record::new()).await.unwrap();
    }

    let outcome = p.destroy().await.unwrap();
    assert_eq!(
        outcome.relation("items").unwrap().strategy,
        Some(StrategyKind::Setter)
    );

    assert_eq!(*calls.lock().unwrap(), vec![p.id().unwrap().clone()]);
    assert_eq!(db.find("Item", Filter::all()).await.unwrap().len(), 3);
    assert_eq!(test.log().deletes_on("Item"), 0);
}

#[tokio::test]
async fn setter_can_delete_through_the_db() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(RelationOptions::new().setter("purgeItems")).setter(
                "purgeItems",
                |cx: SetterCx| async move {
                    cx.db
                        .destroy_all(cx.target, cx.relation.scope(cx.parent_id))
                        .await
                },
            ),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    p.association("items").unwrap().create(Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();
    assert_eq!(outcome.relation("items").unwrap().status.deleted_count(), 1);
    assert!(db.find("Item", Filter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn setter_errors_are_gated_by_fail_on_err() {
    let failing = |_: SetterCx| async {
        Err::<DeleteInfo, _>(err!("archive service unavailable"))
    };

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(RelationOptions::new().setter("archiveItems")).setter("archiveItems", failing),
            &["Item"],
        )
        .await;
    let p = db.create("P", Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();
    let (relation, err) = outcome.failures().next().unwrap();
    assert_eq!(relation, "items");
    assert_eq!(err.to_string(), "archive service unavailable");

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(
                RelationOptions::new()
                    .setter("archiveItems")
                    .fail_on_err(true),
            )
            .setter("archiveItems", failing),
            &["Item"],
        )
        .await;
    let p = db.create("P", Record::new()).await.unwrap();

    let err = p.destroy().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "cascade delete of relation `items` failed: archive service unavailable"
    );
}

#[tokio::test]
async fn unregistered_setter() {
    let mut test = DbTest::new();
    let db = test
        .setup(parent(RelationOptions::new().setter("archiveItems")), &["Item"])
        .await;
    let p = db.create("P", Record::new()).await.unwrap();
    p.association("items").unwrap().create(Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();
    let items = outcome.relation("items").unwrap();
    assert_eq!(items.strategy, None);

    let (_, err) = outcome.failures().next().unwrap();
    assert!(err.is_method_not_registered());
    assert_eq!(
        err.to_string(),
        "method `archiveItems` is not registered on model `P`"
    );

    // The engine never falls back to deleting the children itself
    assert_eq!(db.find("Item", Filter::all()).await.unwrap().len(), 1);

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(
                RelationOptions::new()
                    .setter("archiveItems")
                    .fail_on_err(true),
            ),
            &["Item"],
        )
        .await;
    let p = db.create("P", Record::new()).await.unwrap();

    let err = p.destroy().await.unwrap_err();
    assert!(err.root().is_method_not_registered());
    assert!(p.reload().await.unwrap().is_some());
}

#[tokio::test]
async fn panicking_setter_fails_only_its_relation() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            ModelDef::new("P")
                .has_many("items", "Item", "p_id")
                .has_many("notes", "Note", "p_id")
                .cascade(
                    CascadeConfig::new()
                        .relation_with("items", RelationOptions::new().setter("explode"))
                        .relation("notes"),
                )
                .setter("explode", |_: SetterCx| async {
                    if true {
                        panic!("setter bug");
                    }
                    Ok::<_, cascade::Error>(DeleteInfo::default())
                }),
            &["Item", "Note"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    p.association("notes").unwrap().create(Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();

    let (relation, err) = outcome.failures().next().unwrap();
    assert_eq!(relation, "items");
    assert!(err
        .to_string()
        .starts_with("deletion of relation `items` did not complete"));
    assert_eq!(outcome.relation("notes").unwrap().status.deleted_count(), 1);
}
