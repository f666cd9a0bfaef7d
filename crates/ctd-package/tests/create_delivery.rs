use std::fs;
use std::path::Path;

use ctd_package::{
    create_delivery_for_packages, get_packages_in_directory, DeliveryMetadata, Error,
    DELIVERY_NOTE_FILE, TEMP_DIRECTORY,
};
use tempfile::tempdir;

fn write_source_fixture(root: &Path) {
    fs::create_dir_all(root).expect("create source root");
    fs::write(root.join("SBE09_0745_20240301.txt"), b"standard").expect("write txt");
    fs::write(root.join("SBE09_0745_20240301.cnv"), b"cnv").expect("write cnv");
    fs::write(root.join("SBE09_0745_20240301.hex"), b"hex").expect("write hex");
    fs::write(root.join("SBE09_0745_20240301.sensorinfo"), b"sensors").expect("write sensorinfo");
    fs::write(root.join("SBE09_0746_20240302.txt"), b"standard").expect("write txt");
    fs::write(root.join("SBE09_0746_20240302.png"), b"plot").expect("write png");
}

#[test]
fn delivery_copies_files_into_layout_and_writes_note() {
    let workspace = tempdir().expect("temp dir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("output");
    write_source_fixture(&source);
    fs::create_dir_all(&output).expect("create output");

    let packages = get_packages_in_directory(&source, Some(TEMP_DIRECTORY)).expect("discover");
    assert_eq!(packages.len(), 2);

    let metadata = DeliveryMetadata::from_fields("NAT", "Spring cruise", "", "");
    let note_path =
        create_delivery_for_packages(&packages, &output, false, &metadata).expect("deliver");

    assert_eq!(note_path, output.join(DELIVERY_NOTE_FILE));
    assert!(output.join("processed_data/SBE09_0745_20240301.txt").is_file());
    assert!(output.join("processed_data/SBE09_0746_20240302.txt").is_file());
    assert!(output.join("cnv/SBE09_0745_20240301.cnv").is_file());
    assert!(output.join("raw_data/SBE09_0745_20240301.hex").is_file());
    assert!(output.join("metadata/SBE09_0745_20240301.sensorinfo").is_file());
    assert!(output.join("plots/SBE09_0746_20240302.png").is_file());

    let note: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&note_path).expect("read note")).expect("json");
    assert_eq!(note["program"], "NAT");
    assert_eq!(note["description"], "Spring cruise");
    assert!(note.get("contact").is_none(), "blank fields are omitted");
    assert_eq!(note["packages"][0]["key"], "SBE09_0745_20240301");
    assert_eq!(note["packages"][1]["files"].as_array().map(Vec::len), Some(2));
}

#[test]
fn existing_target_is_reported_before_anything_is_written() {
    let workspace = tempdir().expect("temp dir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("output");
    write_source_fixture(&source);
    fs::create_dir_all(output.join("plots")).expect("create output");
    let colliding = output.join("plots/SBE09_0746_20240302.png");
    fs::write(&colliding, b"old plot").expect("write colliding file");

    let packages = get_packages_in_directory(&source, None).expect("discover");
    let result =
        create_delivery_for_packages(&packages, &output, false, &DeliveryMetadata::default());

    match result {
        Err(Error::FileExists(path)) => assert_eq!(path, colliding),
        other => panic!("expected FileExists, got {other:?}"),
    }
    assert!(!output.join("processed_data").exists(), "nothing copied");
    assert!(!output.join(DELIVERY_NOTE_FILE).exists());
    assert_eq!(fs::read(&colliding).expect("read"), b"old plot");
}

#[test]
fn overwrite_replaces_existing_files() {
    let workspace = tempdir().expect("temp dir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("output");
    write_source_fixture(&source);
    fs::create_dir_all(&output).expect("create output");

    let packages = get_packages_in_directory(&source, None).expect("discover");
    let metadata = DeliveryMetadata::default();
    create_delivery_for_packages(&packages, &output, false, &metadata).expect("first delivery");

    fs::write(source.join("SBE09_0745_20240301.cnv"), b"reprocessed").expect("update cnv");
    create_delivery_for_packages(&packages, &output, true, &metadata).expect("second delivery");

    assert_eq!(
        fs::read(output.join("cnv/SBE09_0745_20240301.cnv")).expect("read cnv"),
        b"reprocessed"
    );
}

#[test]
fn missing_output_directory_is_rejected() {
    let workspace = tempdir().expect("temp dir");
    let source = workspace.path().join("source");
    write_source_fixture(&source);
    let packages = get_packages_in_directory(&source, None).expect("discover");

    let missing = workspace.path().join("nowhere");
    assert!(matches!(
        create_delivery_for_packages(&packages, &missing, false, &DeliveryMetadata::default()),
        Err(Error::MissingDirectory(_))
    ));
    assert!(matches!(
        create_delivery_for_packages(&[], workspace.path(), false, &DeliveryMetadata::default()),
        Err(Error::NoPackages)
    ));
}

#[test]
fn files_mapped_to_the_same_target_are_rejected() {
    let workspace = tempdir().expect("temp dir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("output");
    fs::create_dir_all(source.join("2023")).expect("create 2023");
    fs::create_dir_all(source.join("2024")).expect("create 2024");
    fs::create_dir_all(&output).expect("create output");
    fs::write(source.join("2023/A.txt"), b"old cast").expect("write 2023 cast");
    fs::write(source.join("2024/A.txt"), b"new cast").expect("write 2024 cast");

    let packages = get_packages_in_directory(&source, None).expect("discover");
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].files().len(), 2);

    for overwrite in [false, true] {
        let result = create_delivery_for_packages(
            &packages,
            &output,
            overwrite,
            &DeliveryMetadata::default(),
        );
        match result {
            Err(Error::FileExists(path)) => assert_eq!(path, output.join("processed_data/A.txt")),
            other => panic!("expected FileExists, got {other:?}"),
        }
    }
    assert!(!output.join("processed_data").exists(), "nothing copied");
    assert!(!output.join(DELIVERY_NOTE_FILE).exists());
}

#[test]
fn file_already_at_its_target_is_kept_intact() {
    let workspace = tempdir().expect("temp dir");
    let root = workspace.path();
    fs::create_dir_all(root.join("processed_data")).expect("create processed_data");
    let delivered = root.join("processed_data/A.txt");
    fs::write(&delivered, b"standard").expect("write delivered file");

    let packages = get_packages_in_directory(root, None).expect("discover");
    let note = create_delivery_for_packages(&packages, root, true, &DeliveryMetadata::default())
        .expect("deliver in place");

    assert!(note.is_file());
    assert_eq!(fs::read(&delivered).expect("read delivered"), b"standard");
}
