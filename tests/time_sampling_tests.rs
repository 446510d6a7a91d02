//! Time sampling through the public API: validation, lookups, table persistence.

mod common;

use alembic_core::core::{
    decode_time_samplings, encode_time_samplings, SampleSelector, TimeIndexPolicy, TimeSampling,
    TimeSamplingType, ACYCLIC_NUM_SAMPLES, ACYCLIC_TIME_PER_CYCLE,
};
use alembic_core::Error;
use common::{archive, assert_close};

#[test]
fn test_type_validation() {
    assert!(TimeSamplingType::new(1, 1.0 / 24.0).is_ok());
    assert!(TimeSamplingType::new(3, 2.0).is_ok());
    assert!(TimeSamplingType::new(ACYCLIC_NUM_SAMPLES, ACYCLIC_TIME_PER_CYCLE)
        .expect("acyclic pair")
        .is_acyclic());

    for (n, tpc) in [
        (0, 1.0),
        (1, 0.0),
        (1, -1.0),
        (1, f64::INFINITY),
        (1, f64::NAN),
        (ACYCLIC_NUM_SAMPLES, 1.0),
        (2, ACYCLIC_TIME_PER_CYCLE),
    ] {
        let err = TimeSamplingType::new(n, tpc).expect_err("invalid pair accepted");
        assert!(matches!(err, Error::InvalidTimeSampling(_)), "{n} {tpc}: {err}");
    }
}

#[test]
fn test_uniform_times() {
    let ts = TimeSampling::uniform(2.0, 10.0).expect("uniform");
    assert_close(ts.sample_time(0).expect("t0"), 10.0);
    assert_close(ts.sample_time(5).expect("t5"), 20.0);
    assert_eq!(ts.floor_index(13.0, 10).0, 1);
    assert_eq!(ts.ceil_index(13.0, 10).0, 2);
    assert_eq!(ts.floor_index(0.0, 10).0, 0);
    assert_eq!(ts.ceil_index(1000.0, 10).0, 9);
}

#[test]
fn test_cyclic_times() {
    let ts = TimeSampling::cyclic(1.0, 0.0, vec![0.0, 0.1, 0.2, 0.3]).expect("cyclic");
    assert_close(ts.sample_time(6).expect("t6"), 1.2);
    assert_close(ts.sample_time(4).expect("t4"), 1.0);
    assert_eq!(ts.floor_index(1.25, 12).0, 6);
    assert_eq!(ts.ceil_index(1.25, 12).0, 7);
}

#[test]
fn test_acyclic_lookups() {
    let ts = TimeSampling::acyclic(vec![0.0, 0.5, 3.0, 3.1]).expect("acyclic");
    assert_eq!(ts.floor_index(2.0, 4).0, 1);
    assert_eq!(ts.ceil_index(2.0, 4).0, 2);
    assert_eq!(ts.near_index(2.9, 4).0, 2);
    assert_eq!(ts.time_range(4), Some((0.0, 3.1)));
    assert!(TimeSampling::acyclic(vec![1.0, 1.0]).is_err());
}

#[test]
fn test_selector_policies() {
    let ts = TimeSampling::uniform(1.0, 0.0).expect("uniform");
    assert_eq!(SampleSelector::time_floor(2.6).resolve(&ts, 10), 2);
    assert_eq!(SampleSelector::time_ceil(2.4).resolve(&ts, 10), 3);
    assert_eq!(SampleSelector::time_near(2.4).resolve(&ts, 10), 2);
    assert_eq!(SampleSelector::at(2.6, TimeIndexPolicy::Near).resolve(&ts, 10), 3);
    assert_eq!(SampleSelector::from(7usize).resolve(&ts, 10), 7);
}

#[test]
fn test_table_encoding() {
    let table = vec![
        TimeSampling::identity(),
        TimeSampling::uniform(1.0 / 24.0, 1.0).expect("uniform"),
        TimeSampling::cyclic(1.0, 0.5, vec![0.0, 0.25]).expect("cyclic"),
        TimeSampling::acyclic(vec![-1.0, 0.0, 2.5]).expect("acyclic"),
    ];
    let max_samples = vec![1, 48, 4, 3];
    let bytes = encode_time_samplings(&table, &max_samples).expect("encode");
    let (decoded, decoded_max) = decode_time_samplings(&bytes).expect("decode");
    assert_eq!(decoded, table);
    assert_eq!(decoded_max, max_samples);
    assert!(decode_time_samplings(&bytes[..bytes.len() - 3]).is_err());
}

#[test]
fn test_archive_table_dedup_and_persistence() {
    let writer = archive("ts_table");
    assert_eq!(writer.num_time_samplings(), 1);
    let a = writer.add_time_sampling(TimeSampling::uniform(0.5, 0.0).expect("uniform")).expect("add");
    let b = writer.add_time_sampling(TimeSampling::uniform(0.5, 0.0).expect("uniform")).expect("add");
    assert_eq!(a, 1);
    assert_eq!(a, b);

    let props = writer.top().add_child("obj", Default::default()).expect("child").properties().expect("props");
    let mut p = props.add_scalar::<f32>("w", a).expect("scalar");
    for v in [1.0f32, 2.0, 3.0] {
        p.set(&v).expect("set");
    }

    let reader = writer.close().expect("close");
    assert_eq!(reader.num_time_samplings(), 2);
    assert_eq!(reader.time_sampling(1), Some(&TimeSampling::uniform(0.5, 0.0).expect("uniform")));
    assert_eq!(reader.max_num_samples_for_time_sampling(1), Some(3));

    let w = reader
        .find_object("/obj")
        .expect("obj")
        .properties()
        .expect("props")
        .scalar::<f32>("w")
        .expect("w");
    assert_eq!(w.get(SampleSelector::time_near(1.0)).expect("t=1"), 3.0);
    assert_eq!(w.get(SampleSelector::time_floor(0.9)).expect("t=.9"), 2.0);
}

#[test]
fn test_acyclic_append() {
    let writer = archive("acyclic");
    let index = writer
        .add_time_sampling(TimeSampling::acyclic(Vec::new()).expect("empty acyclic"))
        .expect("add");
    let props = writer.top().properties().expect("props");
    let mut p = props.add_scalar::<i32>("frame", index).expect("scalar");
    for (i, t) in [0.0, 0.3, 1.7].into_iter().enumerate() {
        writer.append_sample_time(index, t).expect("append");
        p.set(&(i as i32)).expect("set");
    }
    assert!(writer.append_sample_time(index, 1.0).is_err());
    assert!(writer.append_sample_time(0, 5.0).is_err());

    let reader = writer.close().expect("close");
    let frame = reader.top().expect("top").properties().expect("props").scalar::<i32>("frame").expect("frame");
    assert_eq!(frame.time_sampling().sample_times(), &[0.0, 0.3, 1.7]);
    assert_eq!(frame.get(SampleSelector::time_floor(1.0)).expect("floor"), 1);
    assert_eq!(frame.get(SampleSelector::time_ceil(1.0)).expect("ceil"), 2);
}
