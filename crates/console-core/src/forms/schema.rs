//! Field layouts of the add/edit forms and the writes they produce.

use crate::api::Mutation;
use crate::domain::{
    ItemCreate, ItemUpdate, PlanCreate, PlanUpdate, Record, RecordKind, UserCreate, UserUpdate,
};

use super::state::{FieldKind, FieldSpec, FieldValue, FormState, FormTarget};

const PASSWORD_MIN: usize = 8;

const PLAN_NAME: FieldSpec = FieldSpec::text("nombre", "Name").required();
const PLAN_DESCRIPTION: FieldSpec = FieldSpec::text("descripcion", "Description");
const PLAN_ACTIVE: FieldSpec = FieldSpec::checkbox("activo", "Active");

const ITEM_TITLE: FieldSpec = FieldSpec::text("title", "Title").required();
const ITEM_DESCRIPTION: FieldSpec = FieldSpec::text("description", "Description");

const USER_EMAIL: FieldSpec = FieldSpec::text("email", "Email").kind(FieldKind::Email).required();
const USER_FULL_NAME: FieldSpec = FieldSpec::text("full_name", "Full name");
const USER_PASSWORD: FieldSpec =
    FieldSpec::text("password", "Password").kind(FieldKind::Password).min_len(PASSWORD_MIN);
const USER_CONFIRM: FieldSpec = FieldSpec::text("confirm_password", "Confirm password")
    .kind(FieldKind::Password)
    .matches("password");
const USER_SUPERUSER: FieldSpec = FieldSpec::checkbox("is_superuser", "Is superuser?");
const USER_ACTIVE: FieldSpec = FieldSpec::checkbox("is_active", "Is active?");

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn blank() -> FieldValue {
    text("")
}

/// Trimmed text, `None` when empty
fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl FormState {
    /// Empty "Add ..." form
    pub fn create(kind: RecordKind) -> Self {
        let fields = match kind {
            RecordKind::Plan => vec![(PLAN_NAME, blank()), (PLAN_DESCRIPTION, blank())],
            RecordKind::Item => vec![(ITEM_TITLE, blank()), (ITEM_DESCRIPTION, blank())],
            RecordKind::User => vec![
                (USER_EMAIL, blank()),
                (USER_FULL_NAME, blank()),
                (USER_PASSWORD.required(), blank()),
                (USER_CONFIRM.required(), blank()),
                (USER_SUPERUSER, FieldValue::Flag(false)),
                (USER_ACTIVE, FieldValue::Flag(false)),
            ],
        };
        FormState::new(FormTarget::Create(kind), fields)
    }

    /// "Edit ..." form loaded with `record`
    pub fn edit(record: &Record) -> Self {
        let fields = match record {
            Record::Plan(plan) => vec![
                (PLAN_NAME, text(&plan.name)),
                (PLAN_DESCRIPTION, text(plan.description.as_deref().unwrap_or_default())),
                (PLAN_ACTIVE, FieldValue::Flag(plan.active)),
            ],
            Record::Item(item) => vec![
                (ITEM_TITLE, text(&item.title)),
                (ITEM_DESCRIPTION, text(item.description.as_deref().unwrap_or_default())),
            ],
            Record::User(user) => vec![
                (USER_EMAIL, text(&user.email)),
                (USER_FULL_NAME, text(user.full_name.as_deref().unwrap_or_default())),
                (USER_PASSWORD, blank()),
                (USER_CONFIRM, blank()),
                (USER_SUPERUSER, FieldValue::Flag(user.is_superuser)),
                (USER_ACTIVE, FieldValue::Flag(user.is_active)),
            ],
        };
        let target = FormTarget::Edit { kind: record.kind(), id: record.id().to_string() };
        FormState::new(target, fields)
    }

    /// New value of an edited text field, `None` when unchanged
    fn edited_text(&self, name: &str) -> Option<String> {
        self.changed(name).then(|| self.text(name).trim().to_string())
    }

    fn edited_flag(&self, name: &str) -> Option<bool> {
        self.changed(name).then(|| self.flag(name))
    }

    pub(crate) fn to_mutation(&self) -> Mutation {
        match self.target() {
            FormTarget::Create(RecordKind::Plan) => Mutation::CreatePlan(PlanCreate {
                name: self.text(PLAN_NAME.name).trim().to_string(),
                description: optional(self.text(PLAN_DESCRIPTION.name)),
                active: true,
            }),
            FormTarget::Create(RecordKind::Item) => Mutation::CreateItem(ItemCreate {
                title: self.text(ITEM_TITLE.name).trim().to_string(),
                description: optional(self.text(ITEM_DESCRIPTION.name)),
            }),
            FormTarget::Create(RecordKind::User) => Mutation::CreateUser(UserCreate {
                email: self.text(USER_EMAIL.name).trim().to_string(),
                password: self.text(USER_PASSWORD.name).to_string(),
                full_name: optional(self.text(USER_FULL_NAME.name)),
                is_active: self.flag(USER_ACTIVE.name),
                is_superuser: self.flag(USER_SUPERUSER.name),
            }),
            FormTarget::Edit { kind: RecordKind::Plan, id } => Mutation::UpdatePlan {
                id: id.clone(),
                body: PlanUpdate {
                    name: self.edited_text(PLAN_NAME.name),
                    description: self.edited_text(PLAN_DESCRIPTION.name),
                    active: self.edited_flag(PLAN_ACTIVE.name),
                },
            },
            FormTarget::Edit { kind: RecordKind::Item, id } => Mutation::UpdateItem {
                id: id.clone(),
                body: ItemUpdate {
                    title: self.edited_text(ITEM_TITLE.name),
                    description: self.edited_text(ITEM_DESCRIPTION.name),
                },
            },
            FormTarget::Edit { kind: RecordKind::User, id } => Mutation::UpdateUser {
                id: id.clone(),
                body: UserUpdate {
                    email: self.edited_text(USER_EMAIL.name),
                    full_name: self.edited_text(USER_FULL_NAME.name),
                    password: optional(self.text(USER_PASSWORD.name)),
                    is_active: self.edited_flag(USER_ACTIVE.name),
                    is_superuser: self.edited_flag(USER_SUPERUSER.name),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Plan, User};
    use crate::error::{ApiError, FieldError};

    fn plan() -> Record {
        Record::Plan(Plan {
            id: "p1".into(),
            name: "Basico".into(),
            description: Some("Minimo".into()),
            active: true,
        })
    }

    #[test]
    fn test_edit_save_needs_a_change() {
        let mut form = FormState::edit(&plan());
        assert!(!form.is_dirty());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());

        form.set_text("descripcion", "Ampliado");
        assert!(form.can_submit());

        form.set_text("descripcion", "Minimo");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_update_sends_only_changed_fields() {
        let mut form = FormState::edit(&plan());
        form.set_flag("activo", false);
        let mutation = form.begin_submit().unwrap();
        assert_eq!(
            mutation,
            Mutation::UpdatePlan {
                id: "p1".into(),
                body: PlanUpdate { name: None, description: None, active: Some(false) },
            }
        );
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_none(), "second submit while in flight");
    }

    #[test]
    fn test_required_name_blocks_submit() {
        let mut form = FormState::create(RecordKind::Plan);
        assert!(form.can_submit());
        form.set_text("nombre", "   ");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error("nombre"), Some("Name is required"));
        assert!(!form.is_submitting());

        form.set_text("nombre", " Basico ");
        assert_eq!(form.error("nombre"), None);
        assert_eq!(
            form.begin_submit(),
            Some(Mutation::CreatePlan(PlanCreate {
                name: "Basico".into(),
                description: None,
                active: true,
            }))
        );
    }

    #[test]
    fn test_blur_validates_untouched_fields_do_not() {
        let mut form = FormState::create(RecordKind::Item);
        form.set_text("title", "");
        assert_eq!(form.error("title"), None);
        form.blur("title");
        assert_eq!(form.error("title"), Some("Title is required"));
        form.set_text("title", "x");
        assert_eq!(form.error("title"), None);
    }

    #[test]
    fn test_user_create_rules() {
        let mut form = FormState::create(RecordKind::User);
        form.set_text("email", "not-an-email");
        form.set_text("password", "short");
        form.set_text("confirm_password", "other");
        assert!(!form.validate());
        assert_eq!(form.error("email"), Some("Invalid email address"));
        assert_eq!(form.error("password"), Some("Password must be at least 8 characters"));
        assert_eq!(form.error("confirm_password"), Some("The passwords do not match"));

        form.set_text("email", "ana@example.com");
        form.set_text("password", "longenough");
        form.set_text("confirm_password", "longenough");
        assert!(form.is_valid());
        form.set_flag("is_superuser", true);
        match form.begin_submit() {
            Some(Mutation::CreateUser(body)) => {
                assert_eq!(body.email, "ana@example.com");
                assert!(body.is_superuser);
                assert!(!body.is_active);
                assert_eq!(body.full_name, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_user_edit_password_optional() {
        let user = Record::User(User {
            id: "u1".into(),
            email: "ana@example.com".into(),
            is_active: true,
            is_superuser: false,
            full_name: None,
        });
        let mut form = FormState::edit(&user);
        form.set_text("full_name", "Ana");
        match form.begin_submit() {
            Some(Mutation::UpdateUser { body, .. }) => {
                assert_eq!(body.full_name.as_deref(), Some("Ana"));
                assert_eq!(body.password, None);
                assert_eq!(body.email, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_failure_keeps_values_and_marks_field() {
        let mut form = FormState::create(RecordKind::Plan);
        form.set_text("nombre", "Basico");
        form.set_text("descripcion", "Algo");
        assert!(form.begin_submit().is_some());

        let err = ApiError::Validation(vec![FieldError {
            field: Some("nombre".into()),
            message: "Plan name already exists".into(),
        }]);
        form.finish(&Err(err));
        assert!(!form.is_submitting());
        assert_eq!(form.text("nombre"), "Basico");
        assert_eq!(form.text("descripcion"), "Algo");
        assert_eq!(form.error("nombre"), Some("Plan name already exists"));
    }

    #[test]
    fn test_success_resets_create_and_reloads_edit() {
        let mut form = FormState::create(RecordKind::Item);
        form.set_text("title", "Nuevo");
        form.begin_submit().unwrap();
        form.finish(&Ok(None));
        assert_eq!(form.text("title"), "");
        assert!(!form.is_dirty());

        let mut form = FormState::edit(&plan());
        form.set_text("nombre", "Plus");
        form.begin_submit().unwrap();
        let saved = Record::Plan(Plan {
            id: "p1".into(),
            name: "Plus".into(),
            description: None,
            active: true,
        });
        form.finish(&Ok(Some(saved)));
        assert_eq!(form.text("nombre"), "Plus");
        assert!(!form.can_submit());
    }

    #[test]
    fn test_cancel_restores_loaded_values() {
        let mut form = FormState::edit(&plan());
        form.set_text("nombre", "");
        form.blur("nombre");
        form.reset();
        assert_eq!(form.text("nombre"), "Basico");
        assert_eq!(form.error("nombre"), None);
        assert_eq!(form.title(), "Edit Plan");
    }

    #[test]
    fn test_dismiss_waits_for_save_in_flight() {
        let mut form = FormState::create(RecordKind::Plan);
        form.set_text("nombre", "Premium");
        form.begin_submit().unwrap();
        assert!(!form.dismiss());
        assert_eq!(form.text("nombre"), "Premium");

        form.finish(&Err(ApiError::Network("offline".into())));
        assert_eq!(form.text("nombre"), "Premium");
        assert!(form.dismiss());
        assert_eq!(form.text("nombre"), "");
    }
}
