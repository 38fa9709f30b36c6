use qf_model::{LoadDependentServiceDef, load};
use std::path::Path;

#[test]
fn bundled_models_load_and_solve() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let models = [
        "01_constant_rate.yaml",
        "02_multi_server.yaml",
        "03_terminals.json",
    ];

    for name in models {
        let path = root.join(name);
        let model = load(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let network = model
            .to_network()
            .unwrap_or_else(|e| panic!("Failed to build {}: {}", name, e));
        let metrics = qf_solver::solve(&network)
            .unwrap_or_else(|e| panic!("Failed to solve {}: {}", name, e));
        assert_eq!(metrics.num_centers(), model.center_names().len());
    }
}

#[test]
fn multi_server_model_parses_servers() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let model = load(&root.join("02_multi_server.yaml")).unwrap();
    assert_eq!(
        model.load_dependent.service,
        LoadDependentServiceDef::MultiServer {
            service_time: 0.6,
            servers: 8
        }
    );
}
