use anyhow::Result;
use resumedia::core::persist::PersistedState;
use resumedia::domain::model::StoreState;
use resumedia::domain::ports::{EntryKind, StateStorage};
use resumedia::{
    DocumentStore, Education, Experience, LocalStorage, MemoryStorage, MutationOutcome,
    Proficiency, Resume, ResumeStore, Skill,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const KEY: &str = "resumedia-store";

#[test]
fn test_create_add_experience_then_delete() {
    let storage = MemoryStorage::new();
    let mut store = DocumentStore::open(storage.clone(), KEY);

    let id = store.create("template-a").id.clone();
    assert_eq!(store.resumes().len(), 1);
    assert_eq!(store.current().unwrap().id, id);

    let exp_id = store.next_id(EntryKind::Experience);
    let mut experience = Experience::new(exp_id.clone());
    experience.job_title = "Electrician".to_string();
    assert_eq!(store.add_experience(experience), MutationOutcome::Applied);

    // 目前履歷與已儲存的副本必須一致
    let current = store.current().unwrap().clone();
    assert_eq!(current.experiences[0].job_title, "Electrician");
    assert_eq!(store.find(&id).unwrap(), &current);

    // 持久化的內容只有 currentResume 與 resumes
    let raw = storage.get(KEY).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains_key("currentResume"));
    assert!(object.contains_key("resumes"));
    assert_eq!(
        json["currentResume"]["experiences"][0]["jobTitle"],
        "Electrician"
    );

    assert_eq!(store.remove(&id), MutationOutcome::Applied);
    assert!(store.resumes().is_empty());
    assert!(store.current().is_none());
}

#[test]
fn test_state_survives_reopen_from_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();

    let id = {
        let mut store = DocumentStore::open(LocalStorage::new(base.clone()), KEY);
        let id = store.create("template-b").id.clone();
        let skill_id = store.next_id(EntryKind::Skill);
        let mut skill = Skill::new(skill_id);
        skill.name = "Welding".to_string();
        store.add_skill(skill);
        store.set_loading(true);
        store.set_error(Some("transient".to_string()));
        id
    };

    assert!(temp_dir.path().join(format!("{}.json", KEY)).exists());

    let store = DocumentStore::load(LocalStorage::new(base), KEY)?;
    let current = store.current().unwrap();
    assert_eq!(current.id, id);
    assert_eq!(current.template_id, "template-b");
    assert_eq!(current.skills[0].name, "Welding");
    assert_eq!(store.resumes().len(), 1);

    // 載入中與錯誤狀態不會被保存
    assert!(!store.is_loading());
    assert!(store.error().is_none());
    Ok(())
}

#[test]
fn test_unreadable_state_is_lenient_on_open_and_strict_on_load() {
    let storage = MemoryStorage::new();
    storage.insert(KEY, "{not json");

    let store = DocumentStore::open(storage.clone(), KEY);
    assert!(store.resumes().is_empty());
    assert!(store.current().is_none());

    assert!(DocumentStore::load(storage, KEY).is_err());
}

#[test]
fn test_mutations_without_target_change_nothing() {
    let storage = MemoryStorage::new();
    let mut store = DocumentStore::open(storage.clone(), KEY);

    assert_eq!(
        store.add_experience(Experience::new("exp_1")),
        MutationOutcome::NoCurrentDocument
    );
    assert_eq!(store.remove("resume_missing"), MutationOutcome::NotFound);
    assert!(storage.get(KEY).is_none());

    store.create("template-a");
    let before = store.current().unwrap().clone();

    assert_eq!(
        store.update_experience("exp_missing", Experience::new("exp_missing")),
        MutationOutcome::NotFound
    );
    assert_eq!(store.delete_skill("skill_missing"), MutationOutcome::NotFound);

    // 清單不變，但修改時間仍會更新
    let after = store.current().unwrap();
    assert_eq!(after.experiences, before.experiences);
    assert_eq!(after.skills, before.skills);
    assert!(after.updated_at > before.updated_at);
}

#[test]
fn test_duplicate_entry_id_is_rejected() {
    let mut store = DocumentStore::new(MemoryStorage::new());
    store.create("template-a");

    assert_eq!(
        store.add_experience(Experience::new("exp_1")),
        MutationOutcome::Applied
    );
    let before = store.current().unwrap().clone();
    assert_eq!(
        store.add_experience(Experience::new("exp_1")),
        MutationOutcome::DuplicateId
    );
    assert_eq!(store.current().unwrap(), &before);
}

#[test]
fn test_updated_at_strictly_increases() {
    let mut store = DocumentStore::new(MemoryStorage::new());
    store.create("template-a");

    let mut last = store.current().unwrap().updated_at;
    for n in 0..5 {
        let mut resume = store.current().unwrap().clone();
        resume.summary = format!("revision {}", n);
        store.update(resume);

        let now = store.current().unwrap().updated_at;
        assert!(now > last);
        last = now;
    }
}

#[test]
fn test_listeners_see_every_change_until_unsubscribed() {
    let mut store = DocumentStore::new(MemoryStorage::new());
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let subscription = store.subscribe(Box::new(move |state: &StoreState| {
        sink.lock().unwrap().push(state.resumes.len());
    }));

    store.create("template-a");
    store.create("template-b");
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);

    assert!(store.unsubscribe(subscription));
    store.create("template-c");
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_persisted_document_can_be_read_back() {
    let storage = MemoryStorage::new();
    let mut store = DocumentStore::open(storage.clone(), KEY);
    store.create("template-a");
    let mut resume: Resume = store.current().unwrap().clone();
    resume.full_name = "Jane Doe".to_string();
    store.update(resume);

    let raw = storage.load(KEY).unwrap().unwrap();
    let persisted = PersistedState::from_json(&raw).unwrap();
    let state = persisted.into_state();
    assert_eq!(state.current_resume.unwrap().full_name, "Jane Doe");
    assert_eq!(state.resumes[0].full_name, "Jane Doe");
}

type Store = DocumentStore<MemoryStorage>;

/// Runs one mutation and checks it applied, bumped `updated_at` and kept the saved copy in sync.
fn applied(store: &mut Store, mutate: impl FnOnce(&mut Store) -> MutationOutcome) {
    let before = store.current().unwrap().updated_at;
    assert_eq!(mutate(store), MutationOutcome::Applied);

    let current = store.current().unwrap();
    assert!(current.updated_at > before);
    assert_eq!(store.find(&current.id).unwrap(), current);
}

#[test]
fn test_experience_add_add_update_delete() {
    let mut store = DocumentStore::new(MemoryStorage::new());
    store.create("template-a");

    applied(&mut store, |s| s.add_experience(Experience::new("exp_1")));
    applied(&mut store, |s| s.add_experience(Experience::new("exp_2")));
    let mut changed = Experience::new("exp_1");
    changed.company = "Acme Electric".to_string();
    applied(&mut store, |s| s.update_experience("exp_1", changed));
    applied(&mut store, |s| s.delete_experience("exp_2"));

    let current = store.current().unwrap();
    let ids: Vec<&str> = current.experiences.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["exp_1"]);
    assert_eq!(current.experiences[0].company, "Acme Electric");
}

#[test]
fn test_education_add_add_update_delete() {
    let mut store = DocumentStore::new(MemoryStorage::new());
    store.create("template-a");

    applied(&mut store, |s| s.add_education(Education::new("edu_1")));
    applied(&mut store, |s| s.add_education(Education::new("edu_2")));
    let mut changed = Education::new("edu_2");
    changed.school = "Trade School".to_string();
    changed.degree = "Certificate".to_string();
    applied(&mut store, |s| s.update_education("edu_2", changed));
    applied(&mut store, |s| s.delete_education("edu_1"));

    let current = store.current().unwrap();
    let ids: Vec<&str> = current.education.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["edu_2"]);
    assert_eq!(current.education[0].school, "Trade School");
    assert_eq!(current.education[0].degree, "Certificate");
}

#[test]
fn test_skill_add_add_update_delete() {
    let mut store = DocumentStore::new(MemoryStorage::new());
    store.create("template-a");

    applied(&mut store, |s| s.add_skill(Skill::new("skill_1")));
    applied(&mut store, |s| s.add_skill(Skill::new("skill_2")));
    let mut changed = Skill::new("skill_1");
    changed.name = "Welding".to_string();
    changed.proficiency = Proficiency::Expert;
    applied(&mut store, |s| s.update_skill("skill_1", changed));
    applied(&mut store, |s| s.delete_skill("skill_2"));

    let current = store.current().unwrap();
    let ids: Vec<&str> = current.skills.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["skill_1"]);
    assert_eq!(current.skills[0].name, "Welding");
    assert_eq!(current.skills[0].proficiency, Proficiency::Expert);
}
