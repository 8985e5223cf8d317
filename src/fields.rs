use std::collections::HashMap;

use log::{debug, warn};

use crate::duration::format_duration;
use crate::host::{
    CourseProvider, CourseRecord, CustomFieldKind, HostFault, UserProvider, UserRecord,
};

/// Merged course + user field dictionary, built fresh for every render and
/// never persisted.
#[derive(Debug, Default)]
pub struct FieldDictionary {
    entries: HashMap<String, Option<String>>,
}

impl FieldDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; the builder inserts course fields before user fields,
    /// so on a key collision the user value is the one that survives.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Returns the value for `key`, or `None` when the field is absent or
    /// holds an empty value. Empty follows the host's falsy convention:
    /// missing, null, `""` and `"0"` all count as empty.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Some(value)) if !value.is_empty() && value != "0" => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict.insert(key, Some(value.into()));
        }
        dict
    }
}

/// Builds the placeholder dictionary for one render request by fetching the
/// course and user rows and flattening them under prefixed keys.
pub struct FieldDictionaryBuilder<'a> {
    courses: &'a dyn CourseProvider,
    users: &'a dyn UserProvider,
}

impl<'a> FieldDictionaryBuilder<'a> {
    pub fn new(courses: &'a dyn CourseProvider, users: &'a dyn UserProvider) -> Self {
        Self { courses, users }
    }

    pub fn build(&self, course_id: u64, user_id: u64) -> Result<FieldDictionary, HostFault> {
        let course = self.courses.fetch_course(course_id)?;
        let user = self.users.fetch_user(user_id)?;

        let mut dict = FieldDictionary::new();
        flatten_course(&course, &mut dict);
        flatten_user(&user, &mut dict);

        debug!(
            "built field dictionary for course {} / user {}: {} entries",
            course_id,
            user_id,
            dict.len()
        );
        Ok(dict)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Key scheme is fixed by the host's flattening convention: `course_<field>`
/// for built-in fields, `course_customfield_<shortname>` for custom fields.
fn flatten_course(course: &CourseRecord, dict: &mut FieldDictionary) {
    dict.insert("course_id", Some(course.id.to_string()));
    dict.insert("course_fullname", non_empty(&course.fullname));
    dict.insert("course_shortname", non_empty(&course.shortname));
    dict.insert("course_idnumber", non_empty(&course.idnumber));
    dict.insert("course_summary", non_empty(&course.summary));
    dict.insert(
        "course_startdate",
        course
            .startdate
            .map(|date| date.format("%-d %B %Y").to_string()),
    );

    for field in &course.custom_fields {
        let value = match (field.kind, field.value.as_deref()) {
            (CustomFieldKind::Duration, Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(seconds) => Some(format_duration(seconds, false)),
                Err(_) => {
                    warn!(
                        "course custom field '{}' is not a seconds count: {raw:?}",
                        field.shortname
                    );
                    None
                }
            },
            (_, value) => value.map(str::to_string),
        };
        dict.insert(format!("course_customfield_{}", field.shortname), value);
    }
}

/// Analogous to `flatten_course`, with `user_` and `user_profile_field_`
/// prefixes.
fn flatten_user(user: &UserRecord, dict: &mut FieldDictionary) {
    dict.insert("user_id", Some(user.id.to_string()));
    dict.insert("user_firstname", non_empty(&user.firstname));
    dict.insert("user_lastname", non_empty(&user.lastname));
    dict.insert("user_fullname", non_empty(&user.fullname()));
    dict.insert("user_email", non_empty(&user.email));
    dict.insert("user_idnumber", non_empty(&user.idnumber));
    dict.insert("user_institution", non_empty(&user.institution));
    dict.insert("user_department", non_empty(&user.department));

    for field in &user.profile_fields {
        dict.insert(
            format!("user_profile_field_{}", field.shortname),
            field.value.clone(),
        );
    }
}
