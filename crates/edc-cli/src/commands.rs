use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use edc_cli::ValidationOutcome;
use edc_cli::config::Settings;
use edc_cli::logging::{redact_value, trace_form_data};
use edc_cli::summary::{report_table, vocabulary_table};
use edc_model::{DeathReport, RegisteredSubject, SubjectIdentifier, VocabularyKind};
use edc_store::DeathReportStore;
use edc_validate::{DeathReportForm, FormData, SubjectLookup};

use crate::cli::{RegisterArgs, ShowArgs, SubmitArgs, ValidateArgs, VocabArgs};

pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<ValidationOutcome> {
    let span = info_span!("validate", file = %args.data.display());
    let _guard = span.enter();

    let vocabularies = settings.load_vocabularies()?;
    let data = read_submission(&args.data)?;

    let store;
    let subject;
    let lookup: &dyn SubjectLookup = match &args.subject {
        Some(path) => {
            subject = read_subject(path)?;
            &subject
        }
        None => {
            let path = settings.store_path(args.store.as_deref())?;
            store = load_store(&path)?;
            &store
        }
    };

    let form = DeathReportForm::new(data, &vocabularies, lookup);
    let outcome = ValidationOutcome::from_form(&form);
    log_outcome(&outcome);
    Ok(outcome)
}

pub fn run_submit(args: &SubmitArgs, settings: &Settings) -> Result<ValidationOutcome> {
    let span = info_span!("submit", file = %args.data.display(), update = args.update);
    let _guard = span.enter();

    let store_path = settings.store_path(args.store.as_deref())?;
    let mut store = load_store(&store_path)?;
    let vocabularies = settings.load_vocabularies()?;
    let data = read_submission(&args.data)?;
    let user = settings.user_or_default(args.user.as_deref());

    let (outcome, cleaned) = {
        let form = DeathReportForm::new(data, &vocabularies, &store);
        (ValidationOutcome::from_form(&form), form.cleaned_data().cloned())
    };
    log_outcome(&outcome);
    let Some(data) = cleaned else {
        return Ok(outcome);
    };

    let subject = data.registered_subject.clone();
    if args.update {
        store
            .update_death_report(data, user)
            .context("update death report")?;
    } else {
        store
            .create_death_report(DeathReport::new(data, user))
            .context("create death report")?;
    }
    store
        .save(&store_path)
        .with_context(|| format!("save store {}", store_path.display()))?;
    info!(
        subject = %redact_value(subject.as_str()),
        store = %store_path.display(),
        "saved death report"
    );
    Ok(outcome)
}

pub fn run_show(args: &ShowArgs, settings: &Settings) -> Result<()> {
    let subject: SubjectIdentifier = args.subject.parse()?;
    let store_path = settings.store_path(args.store.as_deref())?;
    let store = load_store(&store_path)?;
    let vocabularies = settings.load_vocabularies()?;

    let Some(report) = store.death_report_for(&subject) else {
        bail!("no death report for subject {subject}");
    };
    let table = report_table(report, store.off_study_record(&subject), &vocabularies);
    println!("{table}");
    Ok(())
}

pub fn run_register(args: &RegisterArgs, settings: &Settings) -> Result<()> {
    let store_path = settings.store_path(args.store.as_deref())?;
    let mut store = DeathReportStore::load_or_default(&store_path)
        .with_context(|| format!("load store {}", store_path.display()))?;
    let subject = read_subject(&args.subject)?;
    let identifier = subject.subject_identifier.clone();

    store.register_subject(subject)?;
    store
        .save(&store_path)
        .with_context(|| format!("save store {}", store_path.display()))?;
    info!(subject = %redact_value(identifier.as_str()), "registered subject");
    println!("Registered {identifier}.");
    Ok(())
}

pub fn run_vocab(args: &VocabArgs, settings: &Settings) -> Result<()> {
    let vocabularies = settings.load_vocabularies()?;
    let kinds = match &args.kind {
        Some(name) => vec![name.parse::<VocabularyKind>()?],
        None => VocabularyKind::ALL.to_vec(),
    };
    for kind in kinds {
        let list = vocabularies
            .list(kind)
            .ok_or_else(|| anyhow!("vocabulary {kind} is not loaded"))?;
        println!("{} ({kind})", kind.label());
        println!("{}", vocabulary_table(list));
    }
    Ok(())
}

fn read_submission(path: &Path) -> Result<FormData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read submission {}", path.display()))?;
    let data = FormData::from_json_str(&content)
        .with_context(|| format!("parse submission {}", path.display()))?;
    trace_form_data(&data);
    Ok(data)
}

fn read_subject(path: &Path) -> Result<RegisteredSubject> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read subject {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse subject {}", path.display()))
}

fn load_store(path: &Path) -> Result<DeathReportStore> {
    if !path.exists() {
        bail!(
            "store file {} does not exist (register a subject first)",
            path.display()
        );
    }
    DeathReportStore::load(path).with_context(|| format!("load store {}", path.display()))
}

fn log_outcome(outcome: &ValidationOutcome) {
    let subject = outcome.subject.as_deref().map_or("-", redact_value);
    if outcome.valid {
        info!(subject = %subject, "submission is valid");
    } else {
        warn!(subject = %subject, errors = outcome.errors.len(), "submission rejected");
    }
}
