//! Cross-checks of the conditional recursion against classical solvers.

use qf_core::{Real, Tolerances, nearly_equal};
use qf_solver::reference::{convolution, mva};
use qf_solver::{Metrics, Network, SolverError, solve, solve_tables};

fn assert_metrics_close(actual: &Metrics, expected: &Metrics, rel: Real) {
    let tol = Tolerances::relative(rel);
    let pairs = [
        ("utilization", &actual.utilization, &expected.utilization),
        ("response_time", &actual.response_time, &expected.response_time),
        ("queue_length", &actual.queue_length, &expected.queue_length),
        ("throughput", &actual.throughput, &expected.throughput),
    ];
    for (name, a, e) in pairs {
        assert_eq!(a.len(), e.len(), "{name} length");
        for (i, (x, y)) in a.iter().zip(e.iter()).enumerate() {
            assert!(
                nearly_equal(*x, *y, tol),
                "{name}[{i}]: {x} vs {y} (rel tol {rel})"
            );
        }
    }
}

#[test]
fn constant_rate_scenario_matches_mva() {
    let net = Network::new(
        5,
        vec![1.0, 0.3, 0.8],
        vec![0.9; 5],
        vec![1.0, 1.0, 1.0, 1.0],
    );
    let cmva = solve(&net).unwrap();
    let reference = mva(&net).unwrap();

    assert_eq!(cmva.num_centers(), 4);
    assert_metrics_close(&cmva, &reference, 1e-5);

    // Hand-checked values for this network
    assert!((cmva.throughput[0] - 0.770_484_553).abs() < 1e-8);
    assert!((cmva.queue_length[0] - 1.914_769_144).abs() < 1e-8);
    assert!((cmva.response_time[3] - 2.012_409_622).abs() < 1e-8);
}

#[test]
fn constant_rate_with_think_time_and_visits_matches_mva() {
    let net = Network::new(
        12,
        vec![0.05, 0.2],
        vec![0.1; 12],
        vec![3.0, 1.5, 0.5],
    )
    .with_think_time(4.0);
    assert_metrics_close(&solve(&net).unwrap(), &mva(&net).unwrap(), 1e-5);
}

#[test]
fn multi_server_matches_convolution() {
    let net = Network::multi_server(6, vec![1.0, 0.3], 2.0, 3, vec![1.0, 2.0, 1.5])
        .unwrap()
        .with_think_time(1.5);
    let cmva = solve(&net).unwrap();
    let reference = convolution(&net).unwrap();
    assert_metrics_close(&cmva, &reference, 1e-5);
}

#[test]
fn larger_multi_server_matches_convolution() {
    let net = Network::multi_server(60, vec![0.2, 0.3], 3.0, 8, vec![1.0, 1.0, 1.0])
        .unwrap()
        .with_think_time(0.5);
    assert_metrics_close(&solve(&net).unwrap(), &convolution(&net).unwrap(), 1e-5);
}

#[test]
fn infinite_server_center_behaves_like_delay() {
    // Sld[t] = s / t is an infinite-server station, i.e. a second delay.
    // Large population exercises the stability of the demand update.
    let n = 400;
    let s = 25.0;
    let ld_service = (1..=n).map(|t| s / t as Real).collect();
    let net = Network::new(n, vec![0.2, 0.05], ld_service, vec![1.0, 1.0, 1.0]);
    let cmva = solve(&net).unwrap();

    let as_delay = Network::new(n, vec![0.2, 0.05], vec![0.0; n], vec![1.0, 1.0, 1.0])
        .with_think_time(s);
    let reference = mva(&as_delay).unwrap();

    let tol = Tolerances::relative(1e-9);
    for i in 0..2 {
        assert!(nearly_equal(cmva.throughput[i], reference.throughput[i], tol));
        assert!(nearly_equal(cmva.queue_length[i], reference.queue_length[i], tol));
    }
    // Requests at the infinite-server station: X * s
    assert!(nearly_equal(cmva.queue_length[2], cmva.throughput[2] * s, tol));
}

#[test]
fn throughput_table_reproduces_center_throughputs() {
    let net = Network::multi_server(7, vec![0.4, 0.7], 1.2, 2, vec![2.0, 1.0, 3.0])
        .unwrap()
        .with_think_time(2.5);
    let (metrics, tables) = solve_tables(&net).unwrap();
    let tables = tables.unwrap();
    let xs = tables.throughput(7, 1);
    let rescaled = [2.0 / 3.0, 1.0 / 3.0, 1.0];
    for (x, v) in metrics.throughput.iter().zip(rescaled) {
        assert!((x - xs * v).abs() < 1e-12);
    }
}

#[test]
fn population_is_conserved() {
    let z = 2.5;
    let net = Network::multi_server(8, vec![0.4, 0.7], 1.2, 2, vec![2.0, 1.0, 3.0])
        .unwrap()
        .with_think_time(z);
    let metrics = solve(&net).unwrap();
    let ld_throughput = metrics.throughput[2];
    let total = metrics.total_queue_length() + ld_throughput * z;
    assert!((total - 8.0).abs() < 1e-9);
}

#[test]
fn littles_law_and_utilization_law_hold() {
    let li_service = vec![0.4, 0.7];
    let net = Network::multi_server(9, li_service.clone(), 1.2, 3, vec![2.0, 1.0, 3.0])
        .unwrap()
        .with_think_time(1.0);
    let metrics = solve(&net).unwrap();
    for c in 0..metrics.num_centers() {
        let q = metrics.throughput[c] * metrics.response_time[c];
        assert!((q - metrics.queue_length[c]).abs() < 1e-9, "center {c}");
    }
    for (c, s) in li_service.iter().enumerate() {
        assert!((metrics.utilization[c] - s * metrics.throughput[c]).abs() < 1e-12);
    }
}

#[test]
fn zero_in_service_table_does_not_fail() {
    let net = Network::new(4, vec![1.0], vec![0.9, 0.0, 0.5, 0.5], vec![1.0, 1.0]);
    let metrics = solve(&net).unwrap();
    for value in metrics
        .utilization
        .iter()
        .chain(&metrics.response_time)
        .chain(&metrics.queue_length)
        .chain(&metrics.throughput)
    {
        assert!(value.is_finite());
    }
}

#[test]
fn zero_service_at_single_request_drops_residence() {
    let net = Network::new(1, vec![1.0], vec![0.0], vec![1.0, 1.0]);
    let metrics = solve(&net).unwrap();
    assert_eq!(metrics.response_time[1], 0.0);
    assert_eq!(metrics.queue_length[1], 0.0);
    assert!((metrics.throughput[0] - 1.0).abs() < 1e-12);
}

#[test]
fn zero_load_dependent_visits_rejected() {
    let net = Network::new(3, vec![1.0, 0.3], vec![0.9; 3], vec![1.0, 1.0, 0.0]);
    assert_eq!(
        solve(&net).unwrap_err(),
        SolverError::InvalidVisitRatio { value: 0.0 }
    );
}

#[test]
fn zero_population_returns_zero_vectors() {
    let net = Network::new(0, vec![1.0, 0.3, 0.8], vec![], vec![1.0; 4]);
    let metrics = solve(&net).unwrap();
    assert_eq!(metrics, Metrics::zeros(4));
    assert_eq!(mva(&net).unwrap(), Metrics::zeros(4));
    assert_eq!(convolution(&net).unwrap(), Metrics::zeros(4));
}
