use std::{
    fs,
    path::{Path, PathBuf},
};

use deep_net::{
    ActFn, DeepNet, NetErr,
    initialization::rng_from_seed,
    persistence::{self, PersistedModel},
    training::train,
};
use ndarray::array;

const EPS: f64 = 1e-9;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("deep-net-{}-{name}.json", std::process::id()))
}

struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str) -> Self {
        Self(temp_path(name))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn trained_net() -> DeepNet {
    let mut rng = rng_from_seed(Some(5));
    let mut net = DeepNet::new(&[2, 4, 3, 1], 0.01, ActFn::tanh(), &mut rng).unwrap();

    let xs = [array![0., 1.], array![1., 0.]];
    let ys = [array![1.], array![0.]];
    train(&mut net, &xs, &ys, 3, 1.).unwrap();
    net
}

fn assert_same_params(a: &DeepNet, b: &DeepNet) {
    assert_eq!(a.layers(), b.layers());
    assert_eq!(a.act_fn(), b.act_fn());
    assert!((a.learning_rate() - b.learning_rate()).abs() < EPS);

    for (x, y) in a.biases().iter().zip(b.biases()) {
        assert!((x - y).abs() < EPS);
    }

    for (wa, wb) in a.weights().iter().zip(b.weights()) {
        assert_eq!(wa.dim(), wb.dim());
        for (x, y) in wa.iter().zip(wb) {
            assert!((x - y).abs() < EPS);
        }
    }
}

#[test]
fn save_then_load() {
    let file = TempFile::new("round-trip");
    let net = trained_net();
    assert!(!net.hidden().is_empty());

    net.save(file.path()).unwrap();
    let loaded = DeepNet::load(file.path()).unwrap();

    assert_same_params(&net, &loaded);
    assert!(loaded.hidden().is_empty());

    let input = array![0.3, 0.7];
    let expected = net.predict(input.view()).unwrap();
    let got = loaded.predict(input.view()).unwrap();
    assert!((expected[0] - got[0]).abs() < EPS);
}

#[test]
fn linear_slope_survives() {
    let file = TempFile::new("linear");
    let mut rng = rng_from_seed(Some(1));
    let net = DeepNet::new(&[3, 2], 0.2, ActFn::linear(0.75), &mut rng).unwrap();

    persistence::save(&net, file.path()).unwrap();
    let loaded = persistence::load(file.path()).unwrap();

    assert_eq!(loaded.act_fn(), ActFn::linear(0.75));
    assert_same_params(&net, &loaded);
}

#[test]
fn missing_or_empty_file_is_not_found() {
    let missing = temp_path("never-written");
    assert!(matches!(
        DeepNet::load(&missing),
        Err(NetErr::ModelNotFound(_))
    ));

    let empty = TempFile::new("empty");
    fs::write(empty.path(), "").unwrap();
    assert!(matches!(
        DeepNet::load(empty.path()),
        Err(NetErr::ModelNotFound(_))
    ));
}

#[test]
fn invalid_models_are_corrupt() {
    let file = TempFile::new("corrupt");
    let mut model = PersistedModel::from(&trained_net());
    model.weights.pop();
    fs::write(file.path(), serde_json::to_vec(&model).unwrap()).unwrap();

    assert!(matches!(
        DeepNet::load(file.path()),
        Err(NetErr::ModelCorrupt(_))
    ));

    let json = r#"{
        "learningRate": 0.1,
        "layers": [2, 1],
        "biases": [0.1, 0.2],
        "activationFunction": 1,
        "weights": [[[0.5], [0.5, 0.1]]]
    }"#;
    assert!(matches!(
        persistence::from_bytes(json.as_bytes()),
        Err(NetErr::ModelCorrupt(_))
    ));
}

#[test]
fn hand_written_model() {
    let json = r#"{
        "learningRate": 0.1,
        "layers": [2, 1],
        "biases": [0.5, 0.0],
        "activationFunction": 2,
        "weights": [[[1.0], [-2.0]]]
    }"#;

    let net = persistence::from_bytes(json.as_bytes()).unwrap();

    assert_eq!(net.act_fn(), ActFn::relu());
    let out = net.predict(array![3., 1.].view()).unwrap();
    assert!((out[0] - 1.5).abs() < EPS);
}

#[test]
fn diverged_network_keeps_the_previous_model() {
    let file = TempFile::new("diverged");
    let good = DeepNet::from_parts(
        0.5,
        vec![1, 1],
        vec![0.1, 0.2],
        vec![array![[0.3]]],
        ActFn::sigmoid(),
    )
    .unwrap();
    good.save(file.path()).unwrap();

    let diverged = DeepNet::from_parts(
        0.5,
        vec![1, 1],
        vec![f64::INFINITY, f64::NEG_INFINITY],
        vec![array![[f64::NAN]]],
        ActFn::sigmoid(),
    )
    .unwrap();

    assert!(matches!(
        diverged.save(file.path()),
        Err(NetErr::ModelCorrupt(_))
    ));

    let loaded = DeepNet::load(file.path()).unwrap();
    assert_same_params(&good, &loaded);
}
