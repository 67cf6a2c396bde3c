//! Class catalog figures

mod common;

use optical_viz::{summarize_images, ClassSummarizer, RenderConfig, VizError};
use pretty_assertions::assert_eq;

use common::{digits, init_tracing};

#[test]
fn test_summarize_images() {
    init_tracing();
    let (images, targets) = digits(200, 10);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_summarize_images.png");

    let figure = summarize_images(&images, &targets, 10, 10, Some(path.as_path())).unwrap();

    let layout = figure.layout();
    assert_eq!((layout.rows, layout.cols), (10, 10));
    assert_eq!(figure.subplots().len(), 100);
    assert_eq!(figure.hidden_slots(), 0);
    assert!(path.exists());
}

#[test]
fn test_per_class_limit() {
    // class 7 has five images, class 3 has one
    let (images, _) = digits(6, 1);
    let targets = [7u8, 7, 3, 7, 7, 7];

    let figure = ClassSummarizer::new(2, 10)
        .config(RenderConfig {
            cell_size: 16,
            ..RenderConfig::default()
        })
        .summarize(&images, &targets)
        .unwrap();

    assert_eq!(figure.source_order(), vec![0, 1, 2]);
    assert_eq!(figure.titles(), vec![Some("7"), Some("7"), Some("3")]);
    assert_eq!(figure.hidden_slots(), 1);
}

#[test]
fn test_class_limit_is_not_an_error() {
    let (images, targets) = digits(30, 10);
    let figure = summarize_images(&images, &targets, 3, 2, None).unwrap();

    let labels: Vec<&str> = figure.titles().into_iter().flatten().collect();
    assert_eq!(labels, vec!["0", "0", "0", "1", "1", "1"]);
    assert_eq!(figure.source_order(), vec![0, 10, 20, 1, 11, 21]);
}

#[test]
fn test_length_mismatch_rejected() {
    let (images, targets) = digits(10, 3);
    let err = summarize_images(&images, &targets[..9], 2, 2, None).unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}

#[test]
fn test_zero_counts_rejected() {
    let (images, targets) = digits(4, 2);
    assert!(summarize_images(&images, &targets, 0, 2, None)
        .unwrap_err()
        .is_invalid_argument());
    assert!(summarize_images(&images, &targets, 2, 0, None)
        .unwrap_err()
        .is_invalid_argument());
}

#[test]
fn test_repeated_summaries_match() {
    let (images, targets) = digits(40, 4);
    let a = summarize_images(&images, &targets, 3, 4, None).unwrap();
    let b = summarize_images(&images, &targets, 3, 4, None).unwrap();
    assert_eq!(a.titles(), b.titles());
    assert_eq!(a.subplots(), b.subplots());
}
