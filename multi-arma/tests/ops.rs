//! Integration tests for the numeric dispatch set.

use multi::{DispatchConfig, DispatchError, FallbackPolicy, Member, Method, MethodBuilder, TypeSet};
use multi_arma::{Arma, ArmaContext, ArmaError, ArmaType, ArmaValue, Col, Mat, Ops};
use proptest::prelude::*;

/// Installs a subscriber once; `RUST_LOG=multi=debug` shows dispatch traces.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ops() -> Ops {
    init_tracing();
    Ops::new().expect("default config is valid")
}

/// One sample value per member, indexed in declaration order.
fn sample(index: usize) -> ArmaValue {
    match index {
        0 => ArmaValue::Real(1.5),
        1 => ArmaValue::Vec(Col::from_slice(&[1.0, 2.0])),
        2 => ArmaValue::Mat(Mat::from_column_major(&[1.0; 4], 2, 2).unwrap()),
        3 => ArmaValue::Int(3),
        4 => ArmaValue::IntVec(Col::from_slice(&[1, 2, 3])),
        _ => ArmaValue::IntMat(Mat::from_column_major(&[0; 6], 3, 2).unwrap()),
    }
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_scalars() {
        let ops = ops();
        let (a, b) = (1.25, 2.5);
        let sum = ops
            .add(&ArmaContext::real(&a), &ArmaContext::real(&b))
            .unwrap();
        assert_eq!(sum, ArmaValue::Real(3.75));

        let (m, n) = (i32::MAX, 1);
        let sum = ops.add(&ArmaContext::int(&m), &ArmaContext::int(&n)).unwrap();
        assert_eq!(sum, ArmaValue::Int(i32::MIN));
    }

    #[test]
    fn test_add_vectors_and_matrices() {
        let ops = ops();
        let sum = ops
            .add(&ArmaContext::ivec(&[1, 2, 3]), &ArmaContext::ivec(&[10, 20, 30]))
            .unwrap();
        assert_eq!(sum, ArmaValue::IntVec(Col::from_slice(&[11, 22, 33])));

        let a = ArmaContext::mat(&[1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let b = ArmaContext::mat(&[0.5, 0.5, 0.5, 0.5], 2, 2).unwrap();
        let sum = ops.add(&a, &b).unwrap();
        assert_eq!(
            sum,
            ArmaValue::Mat(Mat::from_column_major(&[1.5, 2.5, 3.5, 4.5], 2, 2).unwrap())
        );
    }

    #[test]
    fn test_scalar_broadcast_both_sides() {
        let ops = ops();
        let k = 10;
        let v = ArmaContext::ivec(&[1, 2]);
        let left = ops.add(&ArmaContext::int(&k), &v).unwrap();
        let right = ops.add(&v, &ArmaContext::int(&k)).unwrap();
        assert_eq!(left, ArmaValue::IntVec(Col::from_slice(&[11, 12])));
        assert_eq!(left, right);
    }

    #[test]
    fn test_length_mismatch_reaches_caller() {
        let ops = ops();
        let err = ops
            .add(&ArmaContext::vec(&[1.0]), &ArmaContext::vec(&[1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, ArmaError::Length { left: 1, right: 2 }));
    }

    #[test]
    fn test_axpy() {
        let ops = ops();
        let a = 2.0;
        let out = ops
            .axpy(
                &ArmaContext::real(&a),
                &ArmaContext::vec(&[1.0, 2.0, 3.0]),
                &ArmaContext::vec(&[1.0, 1.0, 1.0]),
            )
            .unwrap();
        assert_eq!(out, ArmaValue::Vec(Col::from_slice(&[3.0, 5.0, 7.0])));

        let k = -1;
        let out = ops
            .axpy(
                &ArmaContext::int(&k),
                &ArmaContext::ivec(&[4, 5]),
                &ArmaContext::ivec(&[4, 4]),
            )
            .unwrap();
        assert_eq!(out, ArmaValue::IntVec(Col::from_slice(&[0, -1])));
    }

    #[test]
    fn test_results_feed_back_in() {
        let ops = ops();
        let sum = ops
            .add(&ArmaContext::vec(&[1.0, 2.0]), &ArmaContext::vec(&[3.0, 4.0]))
            .unwrap();
        let again = ops.add(&sum, &sum).unwrap();
        assert_eq!(again, ArmaValue::Vec(Col::from_slice(&[8.0, 12.0])));
        assert_eq!(ops.dims(&again).unwrap(), (2, 1));
    }
}

mod fallback {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_kinds_are_unimplemented() {
        let ops = ops();
        let (n, x) = (1, 1.0);
        let err = ops
            .add(&ArmaContext::int(&n), &ArmaContext::real(&x))
            .unwrap_err();
        assert!(matches!(
            err,
            ArmaError::Dispatch(DispatchError::Unimplemented { .. })
        ));
        assert_eq!(err.to_string(), "`add` is not implemented for (Int, Real)");
    }

    #[test]
    fn test_axpy_shape_of_arguments_matters() {
        let ops = ops();
        let a = 1.0;
        let m = ArmaContext::mat(&[1.0; 4], 2, 2).unwrap();
        let err = ops
            .axpy(&ArmaContext::real(&a), &ArmaContext::vec(&[1.0]), &m)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "`axpy` is not implemented for (Real, Vec, Mat)"
        );
    }

    #[test]
    fn test_wrong_arity_is_reported() {
        let ops = ops();
        let x = 1.0;
        let ctx = ArmaContext::real(&x);
        let err = ops.add_method().call(&[&ctx]).unwrap_err();
        assert!(err.is_unimplemented());
        assert_eq!(err.to_string(), "`add` is not implemented for (Real)");
    }

    #[test]
    #[should_panic(expected = "`add` is not implemented for (Real, IntVec)")]
    fn test_panic_policy() {
        init_tracing();
        let config = DispatchConfig::default().with_fallback(FallbackPolicy::Panic);
        let ops = Ops::with_config(config).unwrap();
        let x = 1.0;
        let _ = ops.add(&ArmaContext::real(&x), &ArmaContext::ivec(&[1]));
    }
}

mod coverage {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dims_is_total() {
        let ops = ops();
        let report = ops.dims_method().coverage(1).unwrap();
        assert!(report.is_total());
        assert_eq!(report.total(), 6);

        let x = 0;
        assert_eq!(ops.dims(&ArmaContext::int(&x)).unwrap(), (1, 1));
        let m = ArmaContext::imat(&[0; 6], 2, 3).unwrap();
        assert_eq!(ops.dims(&m).unwrap(), (2, 3));
    }

    #[test]
    fn test_add_gaps() {
        let ops = ops();
        let report = ops.add_method().coverage(2).unwrap();
        assert_eq!(report.total(), 36);
        assert_eq!(report.implemented.len(), 10);
        assert_eq!(report.missing.len(), 26);
    }

    #[test]
    fn test_table_is_filled() {
        let ops = ops();
        // 6 + 36 + 216
        assert_eq!(ops.axpy_method().table_len(), 258);
    }
}

fn label<A: Member<Arma>, B: Member<Arma>>(_: &A, _: &B) -> String {
    format!("{}-{}", A::TAG, B::TAG)
}

fn row<A: Member<Arma>>(builder: MethodBuilder<Arma, String>) -> MethodBuilder<Arma, String> {
    builder
        .on2(label::<A, f64>)
        .on2(label::<A, Col<f64>>)
        .on2(label::<A, Mat<f64>>)
        .on2(label::<A, i32>)
        .on2(label::<A, Col<i32>>)
        .on2(label::<A, Mat<i32>>)
}

fn labelled() -> Method<Arma, String> {
    let builder = Method::builder("label");
    let builder = row::<f64>(builder);
    let builder = row::<Col<f64>>(builder);
    let builder = row::<Mat<f64>>(builder);
    let builder = row::<i32>(builder);
    let builder = row::<Col<i32>>(builder);
    let builder = row::<Mat<i32>>(builder);
    builder.build().unwrap()
}

#[test]
fn test_labelled_is_total() {
    assert!(labelled().coverage(2).unwrap().is_total());
}

proptest! {
    #[test]
    fn every_pair_reaches_its_own_handler(i in 0usize..6, j in 0usize..6) {
        let method = labelled();
        let (a, b) = (sample(i), sample(j));
        prop_assert_eq!(a.arma_type(), Arma::TAGS[i]);
        prop_assert_eq!(b.arma_type(), Arma::TAGS[j]);

        let expected = format!("{}-{}", a.arma_type(), b.arma_type());
        prop_assert_eq!(method.call(&[&a, &b]).unwrap(), expected);
    }

    #[test]
    fn add_is_commutative_on_int_vectors(
        xs in proptest::collection::vec(any::<i32>(), 0..16),
        seed in any::<i32>(),
    ) {
        let ops = Ops::new().unwrap();
        let ys: Vec<i32> = xs.iter().map(|x| x ^ seed).collect();
        let (a, b) = (ArmaContext::ivec(&xs), ArmaContext::ivec(&ys));
        let ab = ops.add(&a, &b).unwrap();
        let ba = ops.add(&b, &a).unwrap();
        prop_assert_eq!(ab.arma_type(), ArmaType::IntVec);
        prop_assert_eq!(ab, ba);
    }
}
