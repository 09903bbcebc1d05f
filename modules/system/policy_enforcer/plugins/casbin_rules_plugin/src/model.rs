use policy_enforcer_sdk::Credentials;

/// Embedded Casbin model.
///
/// A policy line grants an action pattern to one subject:
///
/// ```text
/// p, role:member, compute:create_instance
/// p, role:admin, compute:*
/// p, user:9f3c2b, identity:update_credential
/// p, admin, identity:*
/// ```
const MODEL: &str = r#"
[request_definition]
r = sub, act

[policy_definition]
p = sub, act

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = r.sub == p.sub && keyMatch(r.act, p.act)
"#;

#[must_use]
pub fn casbin_model_string() -> &'static str {
    MODEL
}

/// Casbin subjects a credential record acts as: the user itself, each of its
/// roles in order, and `admin` for superusers.
#[must_use]
pub fn subjects(credentials: &Credentials) -> Vec<String> {
    let mut subjects = Vec::with_capacity(credentials.roles.len() + 2);
    subjects.push(format!("user:{}", credentials.user_id));
    subjects.extend(credentials.roles.iter().map(|role| format!("role:{role}")));
    if credentials.is_admin {
        subjects.push("admin".to_owned());
    }
    subjects
}
