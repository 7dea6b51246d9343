use cascade::{CascadeConfig, Filter, ModelDef, Record, RelationKind};
use tests::{models, DbTest};

fn physician() -> ModelDef {
    ModelDef::new("Physician")
        .has_many_through(
            "patients",
            "Patient",
            "Appointment",
            "physician_id",
            "patient_id",
        )
        .cascade(CascadeConfig::new().relation("patients"))
}

#[tokio::test]
async fn removes_join_rows_and_keeps_targets() {
    let mut test = DbTest::new();
    let db = test
        .setup_db(models!(
            physician(),
            ModelDef::new("Appointment"),
            ModelDef::new("Patient"),
        ))
        .await;

    let house = db.create("Physician", Record::new().with("name", "house")).await.unwrap();
    let wilson = db.create("Physician", Record::new().with("name", "wilson")).await.unwrap();

    let patients = house.association("patients").unwrap();
    assert_eq!(patients.name(), "patients");
    assert_eq!(patients.relation().kind(), RelationKind::HasManyThrough);
    assert_eq!(Some(patients.parent_id()), house.id());
    let shared = patients
        .create(Record::new().with("name", "shared"))
        .await
        .unwrap();
    patients
        .create(Record::new().with("name", "solo"))
        .await
        .unwrap();
    wilson.association("patients").unwrap().add(&shared).await.unwrap();

    assert_eq!(patients.all().await.unwrap().len(), 2);
    assert_eq!(db.find("Appointment", Filter::all()).await.unwrap().len(), 3);

    let outcome = house.destroy().await.unwrap();
    assert_eq!(outcome.relation("patients").unwrap().status.deleted_count(), 2);

    // Patients survive; only house's appointments are gone
    assert_eq!(db.find("Patient", Filter::all()).await.unwrap().len(), 2);
    let appointments = db.find("Appointment", Filter::all()).await.unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].get("physician_id"), wilson.id());

    let log = test.log();
    assert_eq!(log.deletes_on("Patient"), 0);
    assert_eq!(log.filter_deletes_on("Appointment"), 1);
}

#[tokio::test]
async fn add_requires_has_many_through() {
    let mut test = DbTest::new();
    let db = test
        .setup_db(models!(
            ModelDef::new("Book").has_many("chapters", "Chapter", "book_id"),
            ModelDef::new("Chapter"),
        ))
        .await;

    let book = db.create("Book", Record::new()).await.unwrap();
    let chapter = db.create("Chapter", Record::new()).await.unwrap();

    let err = book
        .association("chapters")
        .unwrap()
        .add(&chapter)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "`add` requires a has-many-through relation; relation `chapters` is has-many"
    );
}
