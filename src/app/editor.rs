use crate::domain::model::{ContactField, Education, Experience, Skill};
use crate::domain::ports::{EntryKind, MutationOutcome, ResumeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ContactChanged { field: ContactField, value: String },
    AddExperience,
    UpdateExperience { id: String, experience: Experience },
    DeleteExperience(String),
    AddEducation,
    UpdateEducation { id: String, education: Education },
    DeleteEducation(String),
    AddSkill,
    UpdateSkill { id: String, skill: Skill },
    DeleteSkill(String),
    ToggleSection(Section),
    EditItem(String),
    FinishEditing,
}

/// Form state of the resume editor. Document changes go straight to the store;
/// only section visibility and the entry being edited live here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeEditor {
    contact: bool,
    summary: bool,
    experience: bool,
    education: bool,
    skills: bool,
    editing: Option<String>,
}

impl Default for ResumeEditor {
    fn default() -> Self {
        Self {
            contact: true,
            summary: true,
            experience: true,
            education: false,
            skills: false,
            editing: None,
        }
    }
}

impl ResumeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        match section {
            Section::Contact => self.contact,
            Section::Summary => self.summary,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Skills => self.skills,
        }
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    fn toggle(&mut self, section: Section) {
        let flag = match section {
            Section::Contact => &mut self.contact,
            Section::Summary => &mut self.summary,
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
        };
        *flag = !*flag;
    }

    /// Applies one input event. Returns `None` for events that only change form state.
    pub fn apply<R: ResumeStore + ?Sized>(
        &mut self,
        store: &mut R,
        event: EditorEvent,
    ) -> Option<MutationOutcome> {
        let outcome = match event {
            EditorEvent::ContactChanged { field, value } => {
                let Some(mut resume) = store.current().cloned() else {
                    return Some(MutationOutcome::NoCurrentDocument);
                };
                resume.set_field(field, value);
                store.update(resume)
            }
            EditorEvent::AddExperience => {
                let id = store.next_id(EntryKind::Experience);
                let outcome = store.add_experience(Experience::new(id.clone()));
                self.start_editing_if(outcome, id);
                outcome
            }
            EditorEvent::UpdateExperience { id, experience } => {
                store.update_experience(&id, experience)
            }
            EditorEvent::DeleteExperience(id) => self.delete(store.delete_experience(&id), &id),
            EditorEvent::AddEducation => {
                let id = store.next_id(EntryKind::Education);
                let outcome = store.add_education(Education::new(id.clone()));
                self.start_editing_if(outcome, id);
                outcome
            }
            EditorEvent::UpdateEducation { id, education } => {
                store.update_education(&id, education)
            }
            EditorEvent::DeleteEducation(id) => self.delete(store.delete_education(&id), &id),
            EditorEvent::AddSkill => {
                let id = store.next_id(EntryKind::Skill);
                let outcome = store.add_skill(Skill::new(id.clone()));
                self.start_editing_if(outcome, id);
                outcome
            }
            EditorEvent::UpdateSkill { id, skill } => store.update_skill(&id, skill),
            EditorEvent::DeleteSkill(id) => self.delete(store.delete_skill(&id), &id),
            EditorEvent::ToggleSection(section) => {
                self.toggle(section);
                return None;
            }
            EditorEvent::EditItem(id) => {
                self.editing = Some(id);
                return None;
            }
            EditorEvent::FinishEditing => {
                self.editing = None;
                return None;
            }
        };
        Some(outcome)
    }

    fn start_editing_if(&mut self, outcome: MutationOutcome, id: String) {
        if outcome.is_applied() {
            self.editing = Some(id);
        }
    }

    fn delete(&mut self, outcome: MutationOutcome, id: &str) -> MutationOutcome {
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::core::store::DocumentStore;

    fn store_with_resume() -> DocumentStore<MemoryStorage> {
        let mut store = DocumentStore::new(MemoryStorage::new());
        store.create("template-a");
        store
    }

    #[test]
    fn test_default_sections() {
        let editor = ResumeEditor::new();
        assert!(editor.is_expanded(Section::Contact));
        assert!(editor.is_expanded(Section::Experience));
        assert!(!editor.is_expanded(Section::Education));
        assert!(!editor.is_expanded(Section::Skills));
    }

    #[test]
    fn test_contact_change_updates_saved_resume() {
        let mut store = store_with_resume();
        let mut editor = ResumeEditor::new();

        let outcome = editor.apply(
            &mut store,
            EditorEvent::ContactChanged {
                field: ContactField::Email,
                value: "jane@example.com".to_string(),
            },
        );

        assert_eq!(outcome, Some(MutationOutcome::Applied));
        assert_eq!(store.current().unwrap().email, "jane@example.com");
        assert_eq!(store.resumes()[0].email, "jane@example.com");
    }

    #[test]
    fn test_add_marks_new_entry_as_editing() {
        let mut store = store_with_resume();
        let mut editor = ResumeEditor::new();

        editor.apply(&mut store, EditorEvent::AddSkill);
        let skill = store.current().unwrap().skills[0].clone();
        assert!(skill.id.starts_with("skill_"));
        assert_eq!(editor.editing(), Some(skill.id.as_str()));

        editor.apply(&mut store, EditorEvent::DeleteSkill(skill.id.clone()));
        assert!(editor.editing().is_none());
        assert!(store.current().unwrap().skills.is_empty());
    }

    #[test]
    fn test_events_without_resume_report_no_current_document() {
        let mut store = DocumentStore::new(MemoryStorage::new());
        let mut editor = ResumeEditor::new();

        assert_eq!(
            editor.apply(&mut store, EditorEvent::AddExperience),
            Some(MutationOutcome::NoCurrentDocument)
        );
        assert!(editor.editing().is_none());
        assert_eq!(
            editor.apply(
                &mut store,
                EditorEvent::ContactChanged {
                    field: ContactField::FullName,
                    value: "Jane".to_string(),
                }
            ),
            Some(MutationOutcome::NoCurrentDocument)
        );
        assert_eq!(
            editor.apply(&mut store, EditorEvent::ToggleSection(Section::Skills)),
            None
        );
        assert!(editor.is_expanded(Section::Skills));
    }
}
