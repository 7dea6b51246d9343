use cascade::{
    err, AfterDeleteCx, CascadeConfig, DeleteInfo, ModelDef, Record, RelationOptions, Value,
};
use std::sync::{Arc, Mutex};
use tests::DbTest;

type Seen = Arc<Mutex<Vec<(String, Value, Result<DeleteInfo, String>)>>>;

fn recorder(seen: &Seen) -> impl Fn(AfterDeleteCx) -> std::future::Ready<cascade::Result<()>> {
    let seen = seen.clone();
    move |cx: AfterDeleteCx| {
        seen.lock().unwrap().push((
            cx.relation_name,
            cx.parent_id,
            cx.result.map_err(|err| err.to_string()),
        ));
        std::future::ready(Ok(()))
    }
}

fn parent(options: RelationOptions) -> ModelDef {
    ModelDef::new("P")
        .has_many("items", "Item", "p_id")
        .cascade(CascadeConfig::new().relation_with("items", options))
}

#[tokio::test]
async fn callback_observes_the_deletion() {
    let seen = Seen::default();

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(RelationOptions::new().after_delete_callback("itemsGone"))
                .after_delete("itemsGone", recorder(&seen)),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    p.association("items").unwrap().create(Record::new()).await.unwrap();
    p.destroy().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "items");
    assert_eq!(Some(&seen[0].1), p.id());
    assert_eq!(seen[0].2, Ok(DeleteInfo { count: 1 }));
}

#[tokio::test]
async fn callback_observes_failures_without_changing_them() {
    let seen = Seen::default();

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(RelationOptions::new().after_delete_callback("itemsGone"))
                .after_delete("itemsGone", recorder(&seen)),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    test.fail_deletes("Item", "locked");

    let outcome = p.destroy().await.unwrap();
    assert_eq!(outcome.failures().count(), 1);

    assert_eq!(seen.lock().unwrap()[0].2, Err("locked".to_string()));
}

#[tokio::test]
async fn failing_callback_does_not_fail_the_delete() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(
                RelationOptions::new()
                    .fail_on_err(true)
                    .after_delete_callback("itemsGone"),
            )
            .after_delete("itemsGone", |_: AfterDeleteCx| async {
                Err::<(), _>(err!("notification service down"))
            }),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    p.association("items").unwrap().create(Record::new()).await.unwrap();

    let outcome = p.destroy().await.unwrap();
    assert_eq!(outcome.relation("items").unwrap().status.deleted_count(), 1);
    assert_eq!(outcome.failures().count(), 0);
}

#[tokio::test]
async fn unregistered_callback_is_ignored() {
    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(
                RelationOptions::new()
                    .fail_on_err(true)
                    .after_delete_callback("itemsGone"),
            ),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    let outcome = p.destroy().await.unwrap();
    assert!(outcome.relation("items").unwrap().status.is_deleted());
}

#[tokio::test]
async fn skipped_relation_is_not_reported() {
    let seen = Seen::default();

    let mut test = DbTest::new();
    let db = test
        .setup(
            parent(
                RelationOptions::new()
                    .skip_cascade(true)
                    .after_delete_callback("itemsGone"),
            )
            .after_delete("itemsGone", recorder(&seen)),
            &["Item"],
        )
        .await;

    let p = db.create("P", Record::new()).await.unwrap();
    p.destroy().await.unwrap();

    assert!(seen.lock().unwrap().is_empty());
}
