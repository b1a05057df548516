use std::sync::Arc;

use async_trait::async_trait;
use career_core::fields::item;
use career_core::model::RawTable;
use career_core::time::fixed_now;
use services::{AppServices, CatalogError, Clock, MatchBasis, QuizError, SheetsConfig};
use storage::{InMemoryTableSource, SourceError, TableRef, TableSource};

/// Serves every sheet from `inner` except one, which is always unavailable.
struct BrokenSheetSource {
    inner: InMemoryTableSource,
    broken_sheet: String,
}

#[async_trait]
impl TableSource for BrokenSheetSource {
    async fn fetch(&self, table: &TableRef) -> Result<RawTable, SourceError> {
        if table.sheet == self.broken_sheet {
            return Err(SourceError::Unavailable(table.to_string()));
        }
        self.inner.fetch(table).await
    }
}

fn seed(source: &InMemoryTableSource, config: &SheetsConfig) {
    source
        .insert_table(
            config.questions_table(),
            RawTable::from_strings(
                ["ID", "Вопрос", "Вариант 1", "Ключ 1"],
                [vec!["1", "Pick one", "Cat", "A"]],
            ),
        )
        .unwrap();
    source
        .insert_table(
            config.results_table(),
            RawTable::from_strings(["Ключ", "Профессии (ID)"], [vec!["A", "42"]]),
        )
        .unwrap();
    source
        .insert_table(
            config.items_table(),
            RawTable::from_strings(
                ["ID", "Название профессии"],
                [vec!["7", "Pilot"], vec!["42", "Vet"]],
            ),
        )
        .unwrap();
    source
        .insert_table(
            config.groups_table(),
            RawTable::from_strings(["ID группы", "Название группы"], [vec!["g1", "Animals"]]),
        )
        .unwrap();
}

fn app(source: &InMemoryTableSource, config: &SheetsConfig) -> AppServices {
    AppServices::new(config, Arc::new(source.clone()), Clock::fixed(fixed_now()))
}

#[tokio::test]
async fn single_answer_recommends_matching_item() {
    let config = SheetsConfig::new("doc");
    let source = InMemoryTableSource::new();
    seed(&source, &config);
    let services = app(&source, &config);

    let mut session = services
        .quiz()
        .start_session()
        .await
        .unwrap()
        .expect("questions available");

    let question_id = session.current_question().id().to_owned();
    assert!(session.select_answer(&question_id, "A"));
    let outcome = session.finish().expect("quiz can finish");

    assert_eq!(outcome.basis, MatchBasis::ItemIds);
    assert_eq!(outcome.recommended.len(), 1);
    assert_eq!(item::ID.resolve(&outcome.recommended[0]), Some("42"));
}

#[tokio::test]
async fn finish_waits_for_every_question() {
    let config = SheetsConfig::new("doc");
    let source = InMemoryTableSource::new();
    seed(&source, &config);
    source
        .insert_table(
            config.questions_table(),
            RawTable::from_strings(
                ["ID", "Вопрос", "Вариант 1", "Ключ 1", "Вариант 2", "Ключ 2"],
                [
                    vec!["1", "First", "Cat", "A", "Dog", "B"],
                    vec!["2", "Second", "Sea", "A", "", "B"],
                    vec!["3", "Third", "Sky", "A", "Land", "B"],
                ],
            ),
        )
        .unwrap();
    let services = app(&source, &config);
    let mut session = services.quiz().start_session().await.unwrap().unwrap();
    assert_eq!(session.total_questions(), 3);
    assert_eq!(session.questions()[1].options().len(), 1);

    session.select_answer("1", "B");
    session.go_next();
    session.select_answer("2", "A");
    session.go_next();
    assert!(session.finish().is_none());
    assert!(!session.is_complete());

    session.select_answer("3", "A");
    let outcome = session.finish().unwrap();
    assert_eq!(outcome.recommended.len(), 1);
}

#[tokio::test]
async fn sheet_without_valid_questions_starts_no_session() {
    let config = SheetsConfig::new("doc");
    let source = InMemoryTableSource::new();
    seed(&source, &config);
    source
        .insert_table(
            config.questions_table(),
            RawTable::from_strings(["ID", "Вопрос", "Вариант 1"], [vec!["1", "Pick", "Cat"]]),
        )
        .unwrap();

    let services = app(&source, &config);
    assert!(services.quiz().start_session().await.unwrap().is_none());
}

#[tokio::test]
async fn quiz_data_is_fetched_once_across_sessions() {
    let config = SheetsConfig::new("doc");
    let source = InMemoryTableSource::new();
    seed(&source, &config);
    let services = app(&source, &config);

    services.quiz().start_session().await.unwrap().unwrap();
    services.quiz().start_session().await.unwrap().unwrap();

    // questions, results and items: one fetch each
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn source_failures_surface_to_caller() {
    let config = SheetsConfig::new("doc");
    let source = InMemoryTableSource::new();
    seed(&source, &config);
    source.set_offline(true);
    let services = app(&source, &config);

    let err = services.quiz().start_session().await.unwrap_err();
    assert!(matches!(err, QuizError::Source(SourceError::Unavailable(_))));

    source.set_offline(false);
    assert!(services.quiz().start_session().await.unwrap().is_some());
}

#[tokio::test]
async fn catalog_views_resolve_groups() {
    let config = SheetsConfig::new("doc");
    let source = InMemoryTableSource::new();
    seed(&source, &config);
    let services = app(&source, &config);

    let detail = services.catalog().item_detail("42").await.unwrap().unwrap();
    assert_eq!(detail.name, "Vet");
    assert_eq!(detail.group_name, "Группа не найдена");

    let groups = services.catalog().load_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name(), "Animals");
}

#[tokio::test]
async fn catalog_failure_keeps_loaded_quiz_data() {
    let config = SheetsConfig::new("doc");
    let inner = InMemoryTableSource::new();
    seed(&inner, &config);
    let source = BrokenSheetSource {
        inner: inner.clone(),
        broken_sheet: config.items_sheet.clone(),
    };
    let services = AppServices::new(&config, Arc::new(source), Clock::fixed(fixed_now()));

    let err = services.quiz().start_session().await.unwrap_err();
    assert!(matches!(
        err,
        QuizError::Catalog(CatalogError::Source(SourceError::Unavailable(_)))
    ));
    assert_eq!(inner.fetch_count(), 2);

    assert!(services.quiz().start_session().await.is_err());
    assert_eq!(inner.fetch_count(), 2);
}
