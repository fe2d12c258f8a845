//! Field mapper: auto-suggested and user-chosen header bindings.

use std::collections::BTreeSet;

use glee_model::FieldDescriptor;

use crate::error::MappingError;
use crate::utils::compact_key;

/// Holds the field list of one import and its header bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapper {
    fields: Vec<FieldDescriptor>,
    headers: Vec<String>,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Total number of target fields.
    pub total_fields: usize,
    /// Fields with a bound column.
    pub mapped: usize,
    /// Total required fields.
    pub required_total: usize,
    /// Required fields that are bound.
    pub required_mapped: usize,
}

impl FieldMapper {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields,
            headers: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        self.fields
    }

    /// Suggests bindings for every field the user has not bound.
    ///
    /// Manual bindings are kept unless their header is missing from the new
    /// header list, in which case the field goes back to auto-mapping.
    pub fn auto_map(&mut self, headers: &[String]) -> &[FieldDescriptor] {
        self.headers = headers.to_vec();

        for field in &mut self.fields {
            if field.manual {
                let still_present = field
                    .source_column
                    .as_ref()
                    .is_none_or(|column| headers.contains(column));
                if still_present {
                    continue;
                }
                tracing::debug!(
                    target_field = %field.target,
                    "manual binding dropped; header no longer present"
                );
                field.manual = false;
            }
            field.source_column = None;
        }

        let mut claimed: BTreeSet<String> = self
            .fields
            .iter()
            .filter(|field| field.manual)
            .filter_map(|field| field.source_column.clone())
            .collect();

        // Each pass runs over every field before the next one starts, and a
        // header bound once is never offered to another field.
        let passes: [MatchPass; 3] = [literal_match, compact_match, substring_match];
        for pass in passes {
            for field in self
                .fields
                .iter_mut()
                .filter(|field| !field.manual && field.source_column.is_none())
            {
                if let Some(header) = pass(field, headers, &claimed) {
                    claimed.insert(header.clone());
                    field.source_column = Some(header);
                }
            }
        }

        let summary = self.summary();
        tracing::debug!(
            headers = headers.len(),
            mapped = summary.mapped,
            required_mapped = summary.required_mapped,
            required_total = summary.required_total,
            "auto-mapped fields"
        );
        &self.fields
    }

    /// Overrides one binding. `None` explicitly unbinds the field.
    ///
    /// The choice is marked manual and survives later auto-mapping.
    pub fn set_mapping(&mut self, index: usize, header: Option<&str>) -> Result<(), MappingError> {
        let len = self.fields.len();
        let column = match header {
            Some(header) => Some(self.resolve_header(header)?),
            None => None,
        };
        let field = self
            .fields
            .get_mut(index)
            .ok_or(MappingError::FieldIndexOutOfRange { index, len })?;
        field.source_column = column;
        field.manual = true;
        Ok(())
    }

    /// [`set_mapping`](Self::set_mapping) addressed by target field name.
    pub fn set_mapping_by_target(
        &mut self,
        target: &str,
        header: Option<&str>,
    ) -> Result<(), MappingError> {
        let index = self
            .fields
            .iter()
            .position(|field| field.target.eq_ignore_ascii_case(target.trim()))
            .ok_or_else(|| MappingError::UnknownField(target.to_string()))?;
        self.set_mapping(index, header)
    }

    /// Labels of required fields that have no bound column.
    pub fn missing_required(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| field.is_missing())
            .map(|field| field.label.clone())
            .collect()
    }

    /// Fails with the missing labels unless every required field is bound.
    pub fn ensure_complete(&self) -> Result<(), MappingError> {
        let labels = self.missing_required();
        if labels.is_empty() {
            Ok(())
        } else {
            Err(MappingError::MissingRequired { labels })
        }
    }

    /// Source headers no field is bound to.
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|header| {
                !self
                    .fields
                    .iter()
                    .any(|field| field.source_column.as_ref() == Some(*header))
            })
            .map(String::as_str)
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        MappingSummary {
            total_fields: self.fields.len(),
            mapped: self.fields.iter().filter(|f| f.is_bound()).count(),
            required_total: self.fields.iter().filter(|f| f.required).count(),
            required_mapped: self
                .fields
                .iter()
                .filter(|f| f.required && f.is_bound())
                .count(),
        }
    }

    fn resolve_header(&self, header: &str) -> Result<String, MappingError> {
        let wanted = header.trim();
        self.headers
            .iter()
            .find(|h| h.as_str() == wanted)
            .or_else(|| self.headers.iter().find(|h| h.eq_ignore_ascii_case(wanted)))
            .cloned()
            .ok_or_else(|| MappingError::ColumnNotFound(header.to_string()))
    }
}

/// Pure form of [`FieldMapper::auto_map`].
pub fn auto_map(headers: &[String], fields: &[FieldDescriptor]) -> Vec<FieldDescriptor> {
    let mut mapper = FieldMapper::new(fields.to_vec());
    mapper.auto_map(headers);
    mapper.into_fields()
}

type MatchPass = fn(&FieldDescriptor, &[String], &BTreeSet<String>) -> Option<String>;

fn unclaimed<'a>(
    headers: &'a [String],
    claimed: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'a String> + Clone {
    headers.iter().filter(move |h| !claimed.contains(*h))
}

/// Unclaimed header equal to the field's target name, then to its label.
fn literal_match(
    field: &FieldDescriptor,
    headers: &[String],
    claimed: &BTreeSet<String>,
) -> Option<String> {
    let target = field.target.trim();
    let label = field.label.trim();
    let mut candidates = unclaimed(headers, claimed);
    candidates
        .clone()
        .find(|h| h.trim().eq_ignore_ascii_case(target))
        .or_else(|| candidates.find(|h| h.trim().eq_ignore_ascii_case(label)))
        .cloned()
}

/// Unclaimed header equal to the target or label once separators are
/// ignored.
fn compact_match(
    field: &FieldDescriptor,
    headers: &[String],
    claimed: &BTreeSet<String>,
) -> Option<String> {
    let target = compact_key(&field.target);
    let label = compact_key(&field.label);
    unclaimed(headers, claimed)
        .find(|h| {
            let compact = compact_key(h);
            !compact.is_empty() && (compact == target || compact == label)
        })
        .cloned()
}

/// First unclaimed header containing the target name.
fn substring_match(
    field: &FieldDescriptor,
    headers: &[String],
    claimed: &BTreeSet<String>,
) -> Option<String> {
    let target = compact_key(&field.target);
    if target.is_empty() {
        return None;
    }
    unclaimed(headers, claimed)
        .find(|h| compact_key(h).contains(&target))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glee_model::FieldKind;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn fan_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("first_name", "First Name").required(),
            FieldDescriptor::new("last_name", "Last Name").required(),
            FieldDescriptor::new("email", "Email")
                .required()
                .with_kind(FieldKind::Email),
            FieldDescriptor::new("phone", "Phone"),
        ]
    }

    #[test]
    fn binds_concatenated_headers() {
        let mapped = auto_map(&headers(&["FirstName", "LastName", "Email"]), &fan_fields());
        assert_eq!(mapped[0].source_column.as_deref(), Some("FirstName"));
        assert_eq!(mapped[1].source_column.as_deref(), Some("LastName"));
        assert_eq!(mapped[2].source_column.as_deref(), Some("Email"));
        assert_eq!(mapped[3].source_column, None);
    }

    #[test]
    fn exact_wins_over_substring() {
        // "name" is listed first and "Last Name" contains it, but the header
        // belongs to the field that names it exactly.
        let fields = vec![
            FieldDescriptor::new("name", "Name"),
            FieldDescriptor::new("last_name", "Last Name"),
        ];
        let mapped = auto_map(&headers(&["Last Name", "Display Name"]), &fields);
        assert_eq!(mapped[1].source_column.as_deref(), Some("Last Name"));
        assert_eq!(mapped[0].source_column.as_deref(), Some("Display Name"));
    }

    #[test]
    fn substring_skips_claimed_headers() {
        let fields = vec![
            FieldDescriptor::new("email", "Email"),
            FieldDescriptor::new("mail", "Mail"),
        ];
        let mapped = auto_map(&headers(&["Email", "Mailing Address"]), &fields);
        assert_eq!(mapped[0].source_column.as_deref(), Some("Email"));
        assert_eq!(mapped[1].source_column.as_deref(), Some("Mailing Address"));
    }

    #[test]
    fn manual_binding_survives_auto_map() {
        let mut mapper = FieldMapper::new(fan_fields());
        let cols = headers(&["First", "Last", "Email", "Contact Email"]);
        mapper.auto_map(&cols);
        mapper.set_mapping(2, Some("Contact Email")).unwrap();
        mapper.set_mapping(3, None).unwrap();

        mapper.auto_map(&cols);
        assert_eq!(
            mapper.fields()[2].source_column.as_deref(),
            Some("Contact Email")
        );
        assert!(mapper.fields()[3].manual);
        assert_eq!(mapper.fields()[3].source_column, None);
    }

    #[test]
    fn manual_binding_dropped_when_header_disappears() {
        let mut mapper = FieldMapper::new(fan_fields());
        mapper.auto_map(&headers(&["Email", "Contact Email"]));
        mapper.set_mapping(2, Some("Contact Email")).unwrap();

        mapper.auto_map(&headers(&["Email"]));
        assert!(!mapper.fields()[2].manual);
        assert_eq!(mapper.fields()[2].source_column.as_deref(), Some("Email"));
    }

    #[test]
    fn set_mapping_validates_input() {
        let mut mapper = FieldMapper::new(fan_fields());
        mapper.auto_map(&headers(&["Email"]));

        assert_eq!(
            mapper.set_mapping(9, Some("Email")),
            Err(MappingError::FieldIndexOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(
            mapper.set_mapping(0, Some("Nope")),
            Err(MappingError::ColumnNotFound("Nope".into()))
        );
        assert_eq!(
            mapper.set_mapping_by_target("voice_part", Some("Email")),
            Err(MappingError::UnknownField("voice_part".into()))
        );
        mapper.set_mapping_by_target("PHONE", Some("email")).unwrap();
        assert_eq!(mapper.fields()[3].source_column.as_deref(), Some("Email"));
    }

    #[test]
    fn missing_required_lists_labels() {
        let mut mapper = FieldMapper::new(fan_fields());
        mapper.auto_map(&headers(&["Email", "Phone"]));
        assert_eq!(mapper.missing_required(), vec!["First Name", "Last Name"]);
        assert_eq!(
            mapper.ensure_complete(),
            Err(MappingError::MissingRequired {
                labels: vec!["First Name".into(), "Last Name".into()]
            })
        );

        let summary = mapper.summary();
        assert_eq!(summary.mapped, 2);
        assert_eq!(summary.required_total, 3);
        assert_eq!(summary.required_mapped, 1);
    }

    #[test]
    fn header_is_bound_to_one_field_only() {
        let fields = vec![
            FieldDescriptor::new("e_mail", "Contact"),
            FieldDescriptor::new("email", "Email"),
        ];
        let mapped = auto_map(&headers(&["Email"]), &fields);
        assert_eq!(mapped[0].source_column, None);
        assert_eq!(mapped[1].source_column.as_deref(), Some("Email"));
    }

    #[test]
    fn manual_header_is_not_bound_again() {
        let mut mapper = FieldMapper::new(fan_fields());
        let cols = headers(&["First Name", "Last Name", "Email"]);
        mapper.auto_map(&cols);
        mapper.set_mapping(0, Some("Email")).unwrap();

        mapper.auto_map(&cols);
        assert_eq!(mapper.fields()[0].source_column.as_deref(), Some("Email"));
        assert_eq!(mapper.fields()[2].source_column, None);
        assert_eq!(mapper.missing_required(), vec!["Email"]);
    }

    #[test]
    fn unmapped_headers_reported() {
        let mut mapper = FieldMapper::new(fan_fields());
        mapper.auto_map(&headers(&["Email", "Shirt Size"]));
        assert_eq!(mapper.unmapped_headers(), vec!["Shirt Size"]);
    }
}
