//! Transform schema round trips.

mod common;

use alembic_core::abc::{ErrorPolicy, PropertyArgs};
use alembic_core::core::{MetaData, SampleSelector, TimeSampling};
use alembic_core::geom::{IXform, OXform, XformOp, XformOpType, XformSample, XFORM_SCHEMA};
use alembic_core::util::{BBox3d, DMat4, DVec3};
use alembic_core::Error;
use common::{archive, assert_close};

fn trs(t: DVec3, angle: f64, s: f64) -> XformSample {
    XformSample::new()
        .with_op(XformOp::translate(t))
        .with_op(XformOp::rotate_y(angle))
        .with_op(XformOp::scale(DVec3::splat(s)))
}

#[test]
fn test_animated_round_trip() {
    let writer = archive("xform_anim");
    let ts = TimeSampling::uniform(1.0 / 24.0, 0.0).expect("uniform");
    let mut xf = OXform::new(&writer.top(), "spin", ts).expect("xform");
    for frame in 0..5 {
        let f = frame as f64;
        xf.set(&trs(DVec3::new(f, 0.0, 0.0), 10.0 * f, 1.0)).expect("set");
    }
    assert_eq!(xf.num_samples(), 5);
    assert!(!xf.is_constant_identity());
    assert_eq!(
        xf.topology().expect("frozen"),
        &[XformOpType::Translate, XformOpType::RotateY, XformOpType::Scale]
    );

    let reader = writer.close().expect("close");
    let obj = reader.find_object("/spin").expect("spin");
    assert!(obj.matches_schema(XFORM_SCHEMA));
    let xf = IXform::new(obj).expect("ixform");
    assert_eq!(xf.num_samples(), 5);
    assert_eq!(xf.num_ops(), 3);
    assert!(!xf.is_constant());
    assert!(!xf.is_constant_identity());
    assert_close(xf.time_sampling().sample_time(4).expect("t4"), 4.0 / 24.0);

    let s3 = xf.get(3).expect("sample 3");
    assert_eq!(s3, trs(DVec3::new(3.0, 0.0, 0.0), 30.0, 1.0));
    let at_time = xf.get(SampleSelector::time_near(2.0 / 24.0 + 0.001)).expect("by time");
    assert_eq!(at_time.ops()[0].values(), &[2.0, 0.0, 0.0]);
    assert!(s3.matrix().abs_diff_eq(trs(DVec3::new(3.0, 0.0, 0.0), 30.0, 1.0).matrix(), 1e-12));
}

#[test]
fn test_topology_mismatch_keeps_first_sample() {
    let writer = archive("xform_topology");
    let mut xf = OXform::new(&writer.top(), "x", 0).expect("xform");
    let first = XformSample::new()
        .with_op(XformOp::translate(DVec3::new(1.0, 2.0, 3.0)))
        .with_op(XformOp::rotate_x(45.0));
    xf.set(&first).expect("first");

    let err = xf.set(&trs(DVec3::ZERO, 0.0, 2.0)).expect_err("op count changed");
    assert!(matches!(err.root_cause(), Error::TopologyMismatch(_)));
    let reordered = XformSample::new()
        .with_op(XformOp::rotate_x(45.0))
        .with_op(XformOp::translate(DVec3::ONE));
    assert!(matches!(
        xf.set(&reordered).expect_err("op order changed").root_cause(),
        Error::TopologyMismatch(_)
    ));
    assert_eq!(xf.num_samples(), 1);

    let reader = writer.close().expect("close");
    let xf = IXform::new(reader.find_object("/x").expect("x")).expect("ixform");
    assert_eq!(xf.num_samples(), 1);
    assert_eq!(xf.get(0).expect("first"), first);
}

#[test]
fn test_default_channels_stay_virtual() {
    let writer = archive("xform_static");
    let mut xf = OXform::new(&writer.top(), "still", 0).expect("xform");
    let rest = XformSample::new()
        .with_op(XformOp::translate(DVec3::ZERO))
        .with_op(XformOp::scale(DVec3::ONE));
    for _ in 0..3 {
        xf.set(&rest).expect("set");
    }
    assert!(xf.is_constant_identity());

    let moved = XformSample::new()
        .with_op(XformOp::translate(DVec3::new(0.0, 5.0, 0.0)))
        .with_op(XformOp::scale(DVec3::ONE));
    xf.set(&moved).expect("set");
    assert!(!xf.is_constant_identity());

    let reader = writer.close().expect("close");
    let xf = IXform::new(reader.find_object("/still").expect("still")).expect("ixform");
    assert_eq!(xf.num_samples(), 4);
    for i in 0..3 {
        assert_eq!(xf.get(i).expect("rest").matrix(), DMat4::IDENTITY);
    }
    assert_eq!(xf.get(3).expect("moved").translation(), DVec3::new(0.0, 5.0, 0.0));
}

#[test]
fn test_identity_xform() {
    let writer = archive("xform_identity");
    let mut xf = OXform::new(&writer.top(), "group", 0).expect("xform");
    xf.set(&XformSample::identity()).expect("set");
    xf.set(&XformSample::identity().with_inherits(false)).expect("set");
    assert!(xf
        .set(&XformSample::new().with_op(XformOp::translate(DVec3::X)))
        .is_err());

    let reader = writer.close().expect("close");
    let xf = IXform::new(reader.find_object("/group").expect("group")).expect("ixform");
    assert!(xf.is_constant_identity());
    assert_eq!(xf.num_ops(), 0);
    assert!(xf.get(0).expect("s0").inherits());
    assert!(!xf.get(1).expect("s1").inherits());
    assert!(xf.get(2).is_err());
}

#[test]
fn test_child_bounds() {
    let writer = archive("xform_bounds");
    let mut xf = OXform::new(&writer.top(), "b", 0).expect("xform");
    let unit = BBox3d::new(DVec3::ZERO, DVec3::ONE);
    xf.set(&XformSample::identity()).expect("set");
    xf.set(&XformSample::identity().with_child_bounds(unit)).expect("set");
    let inverted = BBox3d::new(DVec3::ONE, DVec3::ZERO);
    xf.set(&XformSample::identity().with_child_bounds(inverted)).expect("set");

    let reader = writer.close().expect("close");
    let xf = IXform::new(reader.find_object("/b").expect("b")).expect("ixform");
    assert!(xf.child_bounds(0).expect("b0").is_empty());
    assert_eq!(xf.child_bounds(1).expect("b1"), unit);
    assert!(xf.child_bounds(2).expect("b2").is_empty());
    assert_eq!(xf.child_bounds_interpretation(), Some("box"));
}

#[test]
fn test_matrix_op_and_repeat() {
    let writer = archive("xform_matrix");
    let mut xf = OXform::new(&writer.top(), "m", PropertyArgs::new()).expect("xform");
    assert!(xf.set_from_previous().is_err());
    let m = DMat4::from_translation(DVec3::new(4.0, 5.0, 6.0)) * DMat4::from_rotation_z(0.25);
    xf.set(&XformSample::new().with_op(XformOp::matrix(m).with_hint(2))).expect("set");
    xf.set_from_previous().expect("repeat");

    let reader = writer.close().expect("close");
    let xf = IXform::new(reader.find_object("/m").expect("m")).expect("ixform");
    assert_eq!(xf.num_samples(), 2);
    assert!(xf.is_constant());
    let sample = xf.get(1).expect("s1");
    assert_eq!(sample.ops()[0].hint(), 2);
    assert!(sample.matrix().abs_diff_eq(m, 1e-12));
}

#[test]
fn test_not_an_xform() {
    let writer = archive("not_xform");
    writer.top().add_child("plain", Default::default()).expect("child");
    let reader = writer.close().expect("close");
    let err = IXform::new(reader.find_object("/plain").expect("plain")).err().expect("no schema");
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_too_many_channels() {
    let writer = archive("xform_wide");
    let mut xf = OXform::new(&writer.top(), "wide", 0).expect("xform");
    let mut sample = XformSample::new();
    for _ in 0..16 {
        sample.push(XformOp::matrix(DMat4::IDENTITY));
    }
    assert!(xf.set(&sample).is_err());
    assert_eq!(xf.num_samples(), 0);
    assert!(xf.topology().is_none());
}

#[test]
fn test_retime_xform() {
    let writer = archive("xform_retime");
    let mut xf = OXform::new(&writer.top(), "late", 0).expect("xform");
    let ts = TimeSampling::uniform(0.5, 2.0).expect("uniform");
    xf.set_time_sampling(ts.clone()).expect("retime");
    for i in 0..3 {
        xf.set(&XformSample::new().with_op(XformOp::translate(DVec3::splat(i as f64)))).expect("set");
    }
    assert!(xf.set_time_sampling(9u32).is_err());

    let reader = writer.close().expect("close");
    assert_eq!(reader.num_time_samplings(), 2);
    let xf = IXform::new(reader.find_object("/late").expect("late")).expect("ixform");
    assert_eq!(xf.time_sampling(), &ts);
    let at_time = xf.get(SampleSelector::time_near(3.0)).expect("by time");
    assert_eq!(at_time.translation(), DVec3::splat(2.0));
}

#[test]
fn test_negative_zero_channel() {
    let writer = archive("xform_signed_zero");
    let mut xf = OXform::new(&writer.top(), "z", 0).expect("xform");
    xf.set(&XformSample::new().with_op(XformOp::translate(DVec3::new(-0.0, 0.0, 0.0))))
        .expect("set");
    assert!(!xf.is_constant_identity());

    let reader = writer.close().expect("close");
    let xf = IXform::new(reader.find_object("/z").expect("z")).expect("ixform");
    let x = xf.get(0).expect("s0").ops()[0].values()[0];
    assert!(x.is_sign_negative());
}

#[test]
fn test_schema_keeps_user_meta_data() {
    let writer = archive("xform_meta");
    let args = PropertyArgs::new().with_meta_data(
        MetaData::new().with("rig", "arm_l").with(MetaData::SCHEMA_KEY, "Bogus_v1"),
    );
    let mut xf = OXform::new(&writer.top(), "arm", args).expect("xform");
    xf.set(&XformSample::identity()).expect("set");

    let reader = writer.close().expect("close");
    let obj = reader.find_object("/arm").expect("arm");
    let schema = obj.properties().expect("props").compound(".xform").expect(".xform");
    assert_eq!(schema.meta_data().get("rig"), Some("arm_l"));
    assert_eq!(schema.meta_data().schema(), Some(XFORM_SCHEMA));
    let inherits = schema.property_header_by_name(".inherits").expect("inherits");
    assert!(inherits.meta_data.get("rig").is_none());
}

#[test]
fn test_xform_collect_policy() {
    let writer = archive("xform_collect");
    let args = PropertyArgs::new().with_error_policy(ErrorPolicy::Collect);
    let mut xf = OXform::new(&writer.top(), "c", args).expect("xform");
    let first = XformSample::new().with_op(XformOp::translate(DVec3::X));
    xf.set(&first).expect("set");
    xf.set(&XformSample::identity()).expect("mismatch collected");
    assert_eq!(xf.num_samples(), 1);
    assert_eq!(xf.errors().len(), 1);
    assert!(matches!(xf.take_errors()[0].root_cause(), Error::TopologyMismatch(_)));

    let mut strict = OXform::new(&writer.top(), "s", 0).expect("xform");
    strict.set(&first).expect("set");

    let reader = writer.close().expect("close");
    xf.set(&first).expect("frozen collected");
    xf.set_from_previous().expect("frozen collected");
    assert_eq!(xf.num_samples(), 1);
    assert_eq!(xf.errors().len(), 2);
    assert!(xf.errors().iter().all(|e| matches!(e.root_cause(), Error::Frozen)));

    let err = strict.set(&first).expect_err("frozen");
    assert!(matches!(err.root_cause(), Error::Frozen));
    assert_eq!(strict.num_samples(), 1);
    assert!(strict.errors().is_empty());

    let c = IXform::new(reader.find_object("/c").expect("c")).expect("ixform");
    assert_eq!(c.num_samples(), 1);
    assert_eq!(c.get(0).expect("s0"), first);
}
