//! End-to-end learning loop: record, teach, materialize, match.

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

use learn_unknown::config::Config;
use learn_unknown::host::local::LocalEngine;
use learn_unknown::host::Speaker;
use learn_unknown::skill::LearnSkill;
use learn_unknown::types::Message;

/// Speaker that records what would have been spoken.
#[derive(Default)]
struct RecordingSpeaker {
    spoken: Vec<(String, String)>,
}

impl Speaker for RecordingSpeaker {
    fn speak_dialog(&mut self, name: &str, lang: &str) -> Result<()> {
        self.spoken.push((name.to_string(), lang.to_string()));
        Ok(())
    }
}

fn open_skill(dir: &TempDir) -> LearnSkill {
    LearnSkill::open_at(Config::default(), dir.path().to_path_buf()).unwrap()
}

#[test]
fn unknown_utterance_is_learned_and_answered_next_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut skill = open_skill(&dir);
    let mut engine = LocalEngine::new();
    skill.initialize(&mut engine).unwrap();

    // the first time around nobody matched it and the fallback declined it
    let claimed = skill
        .handle_fallback(&Message::new("What's the meaning of life?"))
        .unwrap();
    assert!(!claimed);
    assert_eq!(engine.match_utterance("what is the meaning of life"), None);

    // the user teaches the answer
    skill
        .teach_statement("the answer to what's the meaning of life is forty two", None)
        .unwrap()
        .expect("teach statement should parse");
    skill.materialize(&mut engine).unwrap();

    // the same utterance now matches directly, bypassing the fallback
    let name = engine
        .match_utterance("What's the meaning of life?")
        .expect("learned intent should match")
        .to_string();

    let mut speaker = RecordingSpeaker::default();
    skill.handle_learned(&name, None, &mut speaker).unwrap();
    assert_eq!(
        speaker.spoken,
        vec![("what is the meaning of life".to_string(), "en-us".to_string())]
    );

    // and the declaration files are what the host matcher would load
    let intent = dir
        .path()
        .join("vocab/en-us/what is the meaning of life.intent");
    let dialog = dir
        .path()
        .join("dialog/en-us/what is the meaning of life.dialog");
    assert_eq!(
        fs::read_to_string(intent).unwrap(),
        "what is the meaning of life\n"
    );
    assert_eq!(fs::read_to_string(dialog).unwrap(), "forty two\n");
}

#[test]
fn learning_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut skill = open_skill(&dir);
        skill
            .handle_fallback(&Message::new("who wrote the iliad"))
            .unwrap();
        skill.teach_answer("who wrote the iliad", "homer", None).unwrap();
    }

    // a fresh process re-registers everything from the settings file
    let mut skill = open_skill(&dir);
    let mut engine = LocalEngine::new();
    let report = skill.initialize(&mut engine).unwrap();

    assert_eq!(report.intents, 1);
    assert_eq!(
        engine.match_utterance("who wrote the iliad"),
        Some("who wrote the iliad")
    );
}

#[test]
fn materialization_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut skill = open_skill(&dir);
    let mut engine = LocalEngine::new();

    skill.teach_answer("what is love", "a feeling", None).unwrap();
    skill.materialize(&mut engine).unwrap();
    skill.materialize(&mut engine).unwrap();
    skill.materialize(&mut engine).unwrap();

    let dialog = dir.path().join("dialog/en-us/what is love.dialog");
    assert_eq!(fs::read_to_string(dialog).unwrap(), "a feeling\n");
}

#[test]
fn entity_values_generalize_learned_intents() {
    let dir = tempfile::tempdir().unwrap();
    let mut skill = open_skill(&dir);
    let mut engine = LocalEngine::new();

    // declare the entity, then teach with a trigger-word phrase
    skill.add_entity_value("city", None, None).unwrap();
    skill
        .teach_answer("what time is it in london city", "time to get a watch", None)
        .unwrap();
    skill.materialize(&mut engine).unwrap();

    // the known value matches through the placeholder
    assert_eq!(
        engine.match_utterance("what time is it in london"),
        Some("what time is it in {city}")
    );
    // an unknown value does not
    assert_eq!(engine.match_utterance("what time is it in dublin"), None);

    // until it is taught as well
    skill
        .add_entity_value("city", Some("dublin"), None)
        .unwrap();
    skill.materialize(&mut engine).unwrap();
    assert_eq!(
        engine.match_utterance("what time is it in dublin"),
        Some("what time is it in {city}")
    );

    // the entity file accumulated both values without duplicates
    let entity = dir.path().join("vocab/en-us/city.entity");
    assert_eq!(fs::read_to_string(entity).unwrap(), "london\ndublin\n");
}

#[test]
fn languages_are_kept_apart_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut skill = open_skill(&dir);
    let mut engine = LocalEngine::new();

    skill
        .handle_fallback(&Message::with_lang("que horas sao", "pt-pt"))
        .unwrap();
    skill.teach_answer("que horas sao", "horas de comprar um relogio", Some("pt-pt")).unwrap();

    // materializing the default language emits nothing for pt-pt
    let report = skill.materialize(&mut engine).unwrap();
    assert_eq!(report.intents, 0);

    let report = skill.materialize_lang("pt-pt", &mut engine).unwrap();
    assert_eq!(report.intents, 1);
    assert!(dir.path().join("vocab/pt-pt/que horas sao.intent").exists());
}

#[test]
fn reteaching_the_same_answer_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut skill = open_skill(&dir);
    let mut engine = LocalEngine::new();

    assert!(skill.teach_answer("what is love", "a feeling", None).unwrap());
    assert!(!skill.teach_answer("what is love", "a feeling", None).unwrap());
    skill.materialize(&mut engine).unwrap();

    let answers = skill.settings().db.answers("en-us", "what is love").unwrap();
    assert_eq!(answers, ["a feeling"]);
}
