use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ctd_package::{DeliveryBackend, DeliveryMetadata, Error, Package, PackageFile};
use delivery_core::{
    CtdPage, DeliveryOutcome, NoticeLevel, PageError, PathField, Saves, SelectionAction,
    PAGE_KEY, SAVES_FILE,
};
use tempfile::{tempdir, TempDir};

#[derive(Clone, Copy)]
enum Failure {
    None,
    Exists,
    Io,
}

struct CreateCall {
    keys: Vec<String>,
    output_dir: PathBuf,
    overwrite: bool,
    metadata: DeliveryMetadata,
}

struct FakeBackend {
    packages: Vec<Package>,
    failure: Failure,
    discover_calls: RefCell<Vec<PathBuf>>,
    create_calls: RefCell<Vec<CreateCall>>,
}

impl FakeBackend {
    fn new(packages: Vec<Package>) -> Self {
        Self {
            packages,
            failure: Failure::None,
            discover_calls: RefCell::new(Vec::new()),
            create_calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(mut self, failure: Failure) -> Self {
        self.failure = failure;
        self
    }
}

impl DeliveryBackend for FakeBackend {
    fn discover(&self, root: &Path, exclude_directory: Option<&str>) -> Result<Vec<Package>, Error> {
        assert_eq!(exclude_directory, Some("temp"));
        self.discover_calls.borrow_mut().push(root.to_path_buf());
        Ok(self.packages.clone())
    }

    fn create_delivery(
        &self,
        packages: &[Package],
        output_dir: &Path,
        overwrite: bool,
        metadata: &DeliveryMetadata,
    ) -> Result<PathBuf, Error> {
        self.create_calls.borrow_mut().push(CreateCall {
            keys: packages.iter().map(|p| p.key().to_string()).collect(),
            output_dir: output_dir.to_path_buf(),
            overwrite,
            metadata: metadata.clone(),
        });
        match self.failure {
            Failure::None => Ok(output_dir.join("delivery_note.json")),
            Failure::Exists => Err(Error::FileExists(output_dir.join("cnv/A.cnv"))),
            Failure::Io => Err(Error::IOError(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only output",
            ))),
        }
    }
}

fn package(key: &str, suffixes: &[&str]) -> Package {
    Package::with_files(
        key,
        suffixes
            .iter()
            .map(|suffix| PackageFile::new(format!("/source/{key}{suffix}"))),
    )
}

struct Harness {
    workspace: TempDir,
    source: PathBuf,
    output: PathBuf,
}

fn harness() -> Harness {
    let workspace = tempdir().expect("temp dir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("output");
    fs::create_dir_all(&source).expect("create source");
    fs::create_dir_all(&output).expect("create output");
    Harness {
        workspace,
        source,
        output,
    }
}

fn scanned_page(harness: &Harness, backend: FakeBackend) -> CtdPage<FakeBackend> {
    let mut page = CtdPage::new(backend);
    page.choose_source_directory(Some(harness.source.clone()));
    page
}

fn complete_packages() -> Vec<Package> {
    vec![
        package("A", &[".txt", ".cnv", ".sensorinfo"]),
        package("B", &[".txt", ".cnv", ".hex", ".sensorinfo"]),
    ]
}

#[test]
fn scanning_drops_packages_without_standard_format_and_warns_once() {
    let harness = harness();
    let backend = FakeBackend::new(vec![
        package("A", &[".txt", ".cnv"]),
        package("B", &[".cnv"]),
        package("C", &[".hex"]),
    ]);

    let mut page = scanned_page(&harness, backend);

    let keys = page.packages().iter().map(Package::key).collect::<Vec<_>>();
    assert_eq!(keys, vec!["A"]);
    assert_eq!(page.selection().items(), ["A.txt"]);

    let notices = page.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(
        notices[0].message,
        "Det saknas standardformat för: B, C. Dessa kommer inte att inkluderas"
    );

    let statistics = page.statistics_all().expect("full statistics");
    assert_eq!(statistics.count(".txt"), 1);
    assert_eq!(statistics.count(".cnv"), 1);
}

#[test]
fn empty_source_directory_warns_and_stays_idle() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(Vec::new()));

    assert!(page.packages().is_empty());
    assert!(page.statistics_all().is_none());
    let notices = page.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0]
        .message
        .starts_with("inga fullständiga paket i rotkatalogen:"));
}

#[test]
fn cancelled_picker_changes_nothing() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(complete_packages()));
    let before = page.fields.clone();

    page.choose_source_directory(None);
    page.choose_output_directory(None);
    page.choose_sharkweb_file(None);

    assert_eq!(page.fields, before);
    assert_eq!(page.backend().discover_calls.borrow().len(), 1);
}

#[test]
fn toggling_selection_recomputes_subset_and_statistics() {
    let harness = harness();
    let backend = FakeBackend::new(vec![
        package("A", &[".txt", ".cnv"]),
        package("B", &[".txt", ".cnv", ".hex"]),
    ]);
    let mut page = scanned_page(&harness, backend);

    page.select_files(["A.txt"]);
    let keys = page
        .selected_packages()
        .iter()
        .map(Package::key)
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["A"]);
    let statistics = page.statistics_selected().expect("selection statistics");
    assert_eq!(statistics.count(".txt"), 1);
    assert_eq!(statistics.count(".cnv"), 1);
    assert_eq!(statistics.count(".hex"), 0);

    page.apply_selection_action(SelectionAction::Select("B.txt".to_string()));
    assert_eq!(page.selected_packages().len(), 2);

    page.apply_selection_action(SelectionAction::DeselectAll);
    assert!(page.selected_packages().is_empty());
    assert!(page.statistics_selected().is_none());
}

#[test]
fn deleted_source_root_is_cleared_and_drops_packages() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(complete_packages()));
    page.choose_output_directory(Some(harness.output.clone()));
    page.select_files(["A.txt"]);
    assert_eq!(page.packages().len(), 2);

    fs::remove_dir_all(&harness.source).expect("remove source");
    let missing = page.check_missing_paths();

    assert!(missing.contains(&PathField::LocalRootDir));
    assert!(missing.contains(&PathField::SharkwebFile), "blank field is missing");
    assert!(!missing.contains(&PathField::OutputDir));
    assert!(page.fields.local_root_dir.get().is_empty());
    assert!(page.packages().is_empty());
    assert!(page.selected_packages().is_empty());
}

#[test]
fn delivery_without_output_directory_never_calls_backend() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(complete_packages()));
    page.select_files(["A.txt"]);

    let outcome = page.create_delivery().expect("guarded delivery");

    assert_eq!(outcome, DeliveryOutcome::Aborted);
    let notices = page.take_notices();
    assert_eq!(notices.last().map(|n| n.message.as_str()), Some("Kan inte skapa leverans. Exportmap saknas!"));
    assert!(page.backend().create_calls.borrow().is_empty());
}

#[test]
fn delivery_without_selection_is_aborted() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(complete_packages()));
    page.choose_output_directory(Some(harness.output.clone()));

    let outcome = page.create_delivery().expect("guarded delivery");

    assert_eq!(outcome, DeliveryOutcome::Aborted);
    assert_eq!(
        page.take_notices().last().map(|n| n.message.clone()),
        Some("Kan inte skapa leverans. Inga filer valda!".to_string())
    );
    assert!(page.backend().create_calls.borrow().is_empty());
}

#[test]
fn delivery_passes_selection_overwrite_and_non_blank_metadata() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(complete_packages()));
    page.choose_output_directory(Some(harness.output.clone()));
    page.select_files(["B.txt"]);
    page.fields.program.set("NAT");
    page.fields.description.set("   ");
    page.fields.contact.set(" Ada ");
    page.overwrite.set(true);
    page.take_notices();

    let outcome = page.create_delivery().expect("delivery");

    assert_eq!(
        outcome,
        DeliveryOutcome::Created {
            note_path: harness.output.join("delivery_note.json")
        }
    );
    let calls = page.backend().create_calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].keys, vec!["B".to_string()]);
    assert_eq!(calls[0].output_dir, harness.output);
    assert!(calls[0].overwrite);
    assert_eq!(
        calls[0].metadata,
        DeliveryMetadata {
            program: Some("NAT".to_string()),
            description: None,
            contact: Some("Ada".to_string()),
            comment: None,
        }
    );
    drop(calls);
    let notices = page.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert_eq!(notices[0].message, "Leverans har skapats!");
}

#[test]
fn existing_file_is_reported_with_its_path() {
    let harness = harness();
    let backend = FakeBackend::new(complete_packages()).failing(Failure::Exists);
    let mut page = scanned_page(&harness, backend);
    page.choose_output_directory(Some(harness.output.clone()));
    page.select_files(["A.txt"]);

    let outcome = page.create_delivery().expect("collision is an outcome");

    let colliding = harness.output.join("cnv/A.cnv");
    assert_eq!(outcome, DeliveryOutcome::AlreadyExists { path: colliding.clone() });
    let notice = page.take_notices().pop().expect("error notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, format!("Fil finns redan: {}", colliding.display()));
}

#[test]
fn unexpected_failure_is_reported_and_returned() {
    let harness = harness();
    let backend = FakeBackend::new(complete_packages()).failing(Failure::Io);
    let mut page = scanned_page(&harness, backend);
    page.choose_output_directory(Some(harness.output.clone()));
    page.select_files(["A.txt"]);

    let result = page.create_delivery();

    assert!(matches!(result, Err(PageError::Delivery(Error::IOError(_)))));
    let notice = page.take_notices().pop().expect("error notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Internt fel: "));
    assert!(notice.message.contains("read-only output"));
}

#[test]
fn missing_sensorinfo_waits_for_confirmation() {
    let harness = harness();
    let backend = FakeBackend::new(vec![
        package("A", &[".txt", ".cnv"]),
        package("B", &[".txt", ".sensorinfo"]),
    ]);
    let mut page = scanned_page(&harness, backend);
    page.choose_output_directory(Some(harness.output.clone()));
    page.select_files(["A.txt", "B.txt"]);

    let outcome = page.create_delivery().expect("pending delivery");
    assert_eq!(outcome, DeliveryOutcome::AwaitingConfirmation);
    let pending = page.pending_delivery().expect("pending");
    assert_eq!(pending.missing_sensorinfo, vec!["A".to_string()]);
    assert!(page.backend().create_calls.borrow().is_empty());

    page.cancel_pending_delivery();
    assert!(page.pending_delivery().is_none());
    assert!(page.backend().create_calls.borrow().is_empty());

    page.create_delivery().expect("pending again");
    let outcome = page.confirm_pending_delivery().expect("confirmed delivery");
    assert!(matches!(outcome, DeliveryOutcome::Created { .. }));
    assert_eq!(page.backend().create_calls.borrow()[0].keys, vec!["A", "B"]);
}

#[test]
fn startup_restores_fields_and_close_saves_them() {
    let harness = harness();
    let saves_path = harness.workspace.path().join(SAVES_FILE);
    let mut store = Saves::load(&saves_path).expect("load store");
    store
        .set(PAGE_KEY, "local_root_dir", harness.source.display().to_string())
        .expect("store root");
    store
        .set(PAGE_KEY, "output_dir", harness.workspace.path().join("gone").display().to_string())
        .expect("store output");
    store.set(PAGE_KEY, "mprog", "NAT").expect("store program");
    store.set(PAGE_KEY, "contact", true).expect("store wrong type");

    let mut page = CtdPage::new(FakeBackend::new(complete_packages()));
    page.startup(&store);

    assert_eq!(page.fields.local_root_dir.get(), harness.source.display().to_string());
    assert!(page.fields.output_dir.get().is_empty(), "missing path cleared");
    assert_eq!(page.fields.program.get(), "NAT");
    assert!(page.fields.contact.get().is_empty(), "mismatched value skipped");
    assert_eq!(page.packages().len(), 2, "startup scans the restored root");

    page.fields.comment.set("second cast redone");
    page.close(&mut store).expect("save page");

    let reloaded = Saves::load(&saves_path).expect("reload");
    assert_eq!(
        reloaded.get(PAGE_KEY, "comment", "".into()).as_text(),
        Some("second cast redone")
    );
    assert_eq!(reloaded.get(PAGE_KEY, "output_dir", "x".into()).as_text(), Some(""));
    assert_eq!(reloaded.get(PAGE_KEY, "contact", "x".into()).as_text(), Some(""));
}

#[test]
fn whitespace_only_path_is_cleared() {
    let harness = harness();
    let mut page = scanned_page(&harness, FakeBackend::new(complete_packages()));
    page.fields.output_dir.set("   ");
    page.fields.sharkweb_file.set("\t");

    let missing = page.check_missing_paths();

    assert!(missing.contains(&PathField::OutputDir));
    assert!(missing.contains(&PathField::SharkwebFile));
    assert_eq!(page.fields.output_dir.get(), "");
    assert_eq!(page.fields.sharkweb_file.get(), "");
    assert_eq!(page.packages().len(), 2, "source root untouched");
}
