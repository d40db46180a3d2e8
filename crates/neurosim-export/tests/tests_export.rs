//! Tests for the export encodings over real analysis documents.

use ahash::AHashMap;
use neurosim_export::{
    export_spike_trains, render_document, save_document, to_columnar, to_interchange_json,
    to_structured_json, ColumnarArchive, ColumnarEntry, ExportFormat, SpikeTrainFormat,
};
use neurosim_oni::OniExporter;
use neurosim_structures::{
    NetworkTopology, NeuronParameters, OniLayerId, SimulationResult, SynapseRecord,
};

fn sample_inputs() -> (SimulationResult, NetworkTopology) {
    let mut topology = NetworkTopology::default();
    for (unit, layer) in [("a", 2u8), ("b", 2), ("c", 11)] {
        topology.neurons.insert(
            unit.to_string(),
            NeuronParameters {
                oni_layer: Some(OniLayerId::new(layer).unwrap()),
            },
        );
    }
    topology.synapses.push(SynapseRecord {
        pre: "a".to_string(),
        post: "c".to_string(),
        weight: 1.25,
    });

    let mut spike_times: AHashMap<String, Vec<f64>> = AHashMap::new();
    spike_times.insert("a".to_string(), vec![3.0, 40.0]);
    spike_times.insert("b".to_string(), vec![4.0, 90.0]);
    spike_times.insert("c".to_string(), vec![60.0]);
    let mut spike_counts: AHashMap<String, u64> = AHashMap::new();
    for (unit, count) in [("a", 2u64), ("b", 2), ("c", 1)] {
        spike_counts.insert(unit.to_string(), count);
    }
    let mut voltages: AHashMap<String, Vec<f64>> = AHashMap::new();
    for unit in ["a", "b", "c"] {
        voltages.insert(unit.to_string(), vec![-65.0; 1000]);
    }

    let result = SimulationResult {
        duration_ms: 100.0,
        dt_ms: 0.1,
        n_steps: 1000,
        n_neurons: 3,
        n_synapses: 1,
        wall_time_secs: 0.02,
        total_spikes: 5,
        mean_firing_rate_hz: 5.0 / 3.0 / 0.1,
        spike_times,
        voltages,
        spike_counts,
        time_vector: Some((0..1000).map(|i| i as f64 * 0.1).collect()),
    };
    (result, topology)
}

#[test]
fn test_structured_encoding_of_real_document() {
    let (result, topology) = sample_inputs();
    let document = OniExporter::with_defaults().export(&result, &topology);
    let value = to_structured_json(&document);

    assert_eq!(value["metadata"]["n_neurons"], 3);
    assert_eq!(value["metadata"]["n_spikes"], 5);
    assert_eq!(value["layers"]["2"]["n_neurons"], 2);
    assert_eq!(value["layers"]["11"]["n_neurons"], 1);
    assert_eq!(value["layers"]["11"]["name"], "Feedback Integration");
    // a -> c crosses layer 2 into layer 11
    assert_eq!(value["connectivity"][1][10], 1.25);
}

#[test]
fn test_cross_format_scalar_parity() {
    let (result, topology) = sample_inputs();
    let document = OniExporter::with_defaults().export(&result, &topology);

    let structured = to_structured_json(&document);
    let interchange = to_interchange_json(&document);
    let columnar = to_columnar(&document);

    let pairs = [
        ("duration", structured["metadata"]["duration_ms"].as_f64()),
        ("dt", structured["metadata"]["dt_ms"].as_f64()),
        (
            "global_coherence",
            structured["global_metrics"]["coherence"].as_f64(),
        ),
        (
            "mean_firing_rate",
            structured["global_metrics"]["mean_firing_rate_hz"].as_f64(),
        ),
        (
            "network_synchrony",
            structured["global_metrics"]["synchrony"].as_f64(),
        ),
    ];
    for (name, expected) in pairs {
        assert_eq!(columnar.scalar(name), expected, "scalar {name}");
    }
    assert_eq!(
        interchange["coherence_analysis"]["Cs_global"].as_f64(),
        structured["global_metrics"]["coherence"].as_f64()
    );
    assert_eq!(
        interchange["firing_statistics"]["total_spikes"],
        structured["metadata"]["n_spikes"]
    );
}

#[test]
fn test_columnar_file_round_trip() {
    let (result, topology) = sample_inputs();
    let document = OniExporter::with_defaults().export(&result, &topology);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.nsc");

    save_document(&document, &path, ExportFormat::Columnar).unwrap();
    let archive = ColumnarArchive::read_from(std::fs::File::open(&path).unwrap()).unwrap();

    assert_eq!(archive.scalar("duration"), Some(100.0));
    assert_eq!(archive.scalar("dt"), Some(0.1));
    match archive.get("connectivity") {
        Some(ColumnarEntry::Matrix { rows, cols, data }) => {
            assert_eq!((*rows, *cols), (14, 14));
            assert_eq!(data[1 * 14 + 10], 1.25);
        }
        other => panic!("unexpected connectivity entry: {other:?}"),
    }
    // Stride 10 over 1000 samples
    assert_eq!(archive.vector("time").unwrap().len(), 100);
    assert_eq!(archive.vector("layer_2_activity").unwrap().len(), 100);
    assert!(archive
        .vector("layer_2_activity")
        .unwrap()
        .iter()
        .all(|&v| v == -65.0));
    assert!(archive
        .vector("layer_1_activity")
        .unwrap()
        .iter()
        .all(|&v| v == 0.0));
}

#[test]
fn test_json_files_match_renders() {
    let (result, topology) = sample_inputs();
    let document = OniExporter::with_defaults().export(&result, &topology);
    let dir = tempfile::tempdir().unwrap();

    for format in [ExportFormat::Json, ExportFormat::OniNative] {
        let path = dir.path().join(format!("run.{}", format.extension()));
        save_document(&document, &path, format).unwrap();
        assert_eq!(
            std::fs::read(&path).unwrap(),
            render_document(&document, format).unwrap()
        );
    }
}

#[test]
fn test_spike_train_exports() {
    let (result, _) = sample_inputs();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("spikes.csv");
    export_spike_trains(&result, &csv_path, SpikeTrainFormat::Csv).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "time_ms,neuron_id");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "3,a");
    assert_eq!(lines[5], "90,b");

    let json_path = dir.path().join("spikes.json");
    export_spike_trains(&result, &json_path, SpikeTrainFormat::Json).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["c"][0], 60.0);

    let sparse_path = dir.path().join("spikes.nsc");
    export_spike_trains(&result, &sparse_path, SpikeTrainFormat::Sparse).unwrap();
    let archive = ColumnarArchive::read_from(std::fs::File::open(&sparse_path).unwrap()).unwrap();
    assert_eq!(archive.vector("shape").unwrap(), &[1000.0, 3.0]);
    assert_eq!(archive.vector("time_indices").unwrap().len(), 5);
}
