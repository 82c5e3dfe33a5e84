use demand_profile::record::GapPolicy;
use demand_profile::{CrudFlag, DemandError, DemandFields, DemandRecord, RecordConfig};

fn record_with(content: &str) -> DemandRecord {
    DemandRecord::from_fields(DemandFields {
        vehicle_type_id: 1,
        content: Some(content.to_string()),
        ..DemandFields::default()
    })
}

#[test]
fn test_malformed_content_fails_every_read() {
    let record = record_with("1.0,abc,3.0");

    for result in [record.demand_size().map(|_| ()), record.demand(0).map(|_| ())] {
        match result {
            Err(DemandError::Decode { column, raw, .. }) => {
                assert_eq!(column, "content");
                assert_eq!(raw, "1.0,abc,3.0");
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}

#[test]
fn test_malformed_overlay_does_not_affect_demands() {
    let mut record = record_with("1.0,2.0");
    record.set_crud_flags(Some("CREATE,BOGUS".to_string()));

    assert_eq!(record.demand(1).unwrap(), 2.0);
    assert!(matches!(
        record.crud_flag(0),
        Err(DemandError::Decode { column: "crudFlags", .. })
    ));
}

#[test]
fn test_whitespace_in_persisted_content_is_trimmed() {
    let mut record = record_with(" 1.5 , 2.5 ");
    assert_eq!(record.demands().unwrap(), &[1.5, 2.5]);

    record.set_demand(0, 3.0).unwrap();
    assert_eq!(record.content(), Some("3.0,2.5"));
}

#[test]
fn test_flag_tags_round_trip() {
    let mut record = DemandRecord::new(1);
    let flags = [CrudFlag::Create, CrudFlag::Update, CrudFlag::Delete];
    for (dt, flag) in flags.into_iter().enumerate() {
        record.set_crud_flag(dt, flag).unwrap();
    }
    assert_eq!(record.crud_flags(), Some("CREATE,UPDATE,DELETE"));

    let reread = DemandRecord::from_fields(record.to_fields());
    let flags: Vec<CrudFlag> = (0..3).map(|dt| reread.crud_flag(dt).unwrap()).collect();
    assert_eq!(flags, vec![CrudFlag::Create, CrudFlag::Update, CrudFlag::Delete]);
}

#[test]
fn test_outside_field_update_rebuilds_cache() {
    let mut record = record_with("1.0");
    assert_eq!(record.demand_size().unwrap(), 1);

    record.set_content(Some("4.0,5.0,6.0".to_string()));
    assert_eq!(record.demand_size().unwrap(), 3);
    record.set_demand(3, 7.0).unwrap();
    assert_eq!(record.content(), Some("4.0,5.0,6.0,7.0"));

    record.set_content(None);
    assert_eq!(record.demand_size().unwrap(), 0);
}

#[test]
fn test_gap_offsets_append_at_length_by_default() {
    let mut record = DemandRecord::new(1);
    record.set_demand(0, 1.0).unwrap();
    record.set_demand(10, 2.0).unwrap();

    assert_eq!(record.demand_size().unwrap(), 2);
    assert_eq!(record.demand(1).unwrap(), 2.0);
    assert_eq!(record.content(), Some("1.0,2.0"));
}

#[test]
fn test_gap_offsets_rejected_when_configured() {
    let config = RecordConfig {
        gap_policy: GapPolicy::Reject,
    };
    let mut record = DemandRecord::with_config(DemandFields::default(), config);
    record.set_demand(0, 1.0).unwrap();

    let err = record.set_demand(2, 2.0).unwrap_err();
    assert_eq!(
        err,
        DemandError::Mutation {
            column: "content",
            offset: 2,
            value: "2.0".to_string(),
            reason: "offset is past the end of the column (length 1)".to_string(),
        }
    );
    assert_eq!(record.content(), Some("1.0"));
}

#[test]
fn test_bad_stamp_leaves_record_consistent() {
    let mut record = DemandRecord::new(1);
    record.set_mod_stamp(0, "2013-01-01").unwrap();

    assert!(matches!(
        record.set_mod_stamp(1, "a,b"),
        Err(DemandError::Mutation { column: "modStamps", offset: 1, .. })
    ));
    assert_eq!(record.mod_stamps(), Some("2013-01-01"));
    assert!(matches!(record.mod_stamp(1), Err(DemandError::Index { .. })));
}

#[test]
fn test_fields_serialize_with_persisted_names() {
    let fields = DemandFields {
        vehicle_type_id: 2,
        content: Some("1.0".to_string()),
        ids: None,
        mod_stamps: Some("x".to_string()),
        crud_flags: None,
    };
    let json = serde_json::to_value(&fields).unwrap();
    assert_eq!(json["vehicleTypeId"], 2);
    assert_eq!(json["content"], "1.0");
    assert_eq!(json["modStamps"], "x");
    assert!(json["crudFlags"].is_null());

    let back: DemandFields = serde_json::from_value(json).unwrap();
    assert_eq!(back, fields);
}
