use crate::value::Value;

/// Narrows the actors shown by a level editor.
#[derive(Debug, Default, Clone)]
pub struct ActorFilter {
    /// Comma separated name fragments; a leading `-` excludes matches.
    pub name_filter: String,
    pub case_sensitive_name: bool,
    pub expected_component: String,
    pub expected_actordef: String,
}

impl ActorFilter {
    pub fn passes(&self, actor: &Value) -> bool {
        let Some(fields) = actor.as_object() else {
            return false;
        };

        if !self.name_filter.trim().is_empty() {
            let fold = |s: &str| {
                if self.case_sensitive_name {
                    s.to_string()
                } else {
                    s.to_lowercase()
                }
            };
            let actor_name = fold(fields.get("sName").and_then(Value::as_str).unwrap_or_default());

            for criteria in self.name_filter.split(',').map(str::trim) {
                let criteria = fold(criteria);
                match criteria.strip_prefix('-') {
                    Some(excluded) if !excluded.is_empty() => {
                        if actor_name.contains(excluded) {
                            return false;
                        }
                    }
                    Some(_) => {}
                    None => {
                        if !actor_name.contains(&criteria) {
                            return false;
                        }
                    }
                }
            }
        }

        if !self.expected_component.is_empty() {
            let wanted = self.expected_component.to_lowercase();
            let has_component = fields
                .get("pComponents")
                .and_then(Value::as_object)
                .is_some_and(|components| {
                    components
                        .keys()
                        .any(|name| name.to_lowercase().contains(&wanted))
                });
            if !has_component {
                return false;
            }
        }

        if !self.expected_actordef.is_empty() {
            let actordef = fields
                .get("oActorDefLink")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !actordef.contains(&self.expected_actordef) {
                return false;
            }
        }

        true
    }
}
