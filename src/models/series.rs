use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schema::{FieldKind, FieldSpec, PayloadSchema};
use crate::entities::series;

/// A persisted TV series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Series {
    /// Storage-assigned identifier
    pub id: i32,
    /// Title
    pub titulo: String,
    /// Release year
    pub ano: i32,
    /// Genre
    pub genero: String,
    /// Number of seasons
    pub qtd_temporadas: i32,
}

/// Inbound payload for creating a series
///
/// `id` is accepted so clients may echo a full record back, but it is never
/// written; storage always assigns its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeriesCreateRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub titulo: String,
    pub ano: i32,
    pub genero: String,
    pub qtd_temporadas: i32,
}

impl PayloadSchema for SeriesCreateRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", FieldKind::Integer),
        FieldSpec::required("titulo", FieldKind::String),
        FieldSpec::required("ano", FieldKind::Integer),
        FieldSpec::required("genero", FieldKind::String),
        FieldSpec::required("qtd_temporadas", FieldKind::Integer),
    ];
}

impl From<series::Model> for Series {
    fn from(model: series::Model) -> Self {
        Self {
            id: model.id,
            titulo: model.titulo,
            ano: model.ano,
            genero: model.genero,
            qtd_temporadas: model.qtd_temporadas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_maps_field_by_field() {
        let model = series::Model {
            id: 7,
            titulo: "Dark".to_string(),
            ano: 2017,
            genero: "Sci-Fi".to_string(),
            qtd_temporadas: 4,
        };

        let series = Series::from(model);
        assert_eq!(series.id, 7);
        assert_eq!(series.titulo, "Dark");
        assert_eq!(series.ano, 2017);
        assert_eq!(series.genero, "Sci-Fi");
        assert_eq!(series.qtd_temporadas, 4);
    }

    #[test]
    fn test_series_serializes_flat() {
        let series = Series {
            id: 1,
            titulo: "Dark".to_string(),
            ano: 2017,
            genero: "Sci-Fi".to_string(),
            qtd_temporadas: 4,
        };

        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            json!({"id": 1, "titulo": "Dark", "ano": 2017, "genero": "Sci-Fi", "qtd_temporadas": 4})
        );
    }

    #[test]
    fn test_create_request_id_is_optional() {
        let request = SeriesCreateRequest::validate(json!({
            "titulo": "Dark",
            "ano": 2017,
            "genero": "Sci-Fi",
            "qtd_temporadas": 4
        }))
        .unwrap();
        assert_eq!(request.id, None);

        let request = SeriesCreateRequest::validate(json!({
            "id": 99,
            "titulo": "Dark",
            "ano": 2017,
            "genero": "Sci-Fi",
            "qtd_temporadas": 4
        }))
        .unwrap();
        assert_eq!(request.id, Some(99));
    }

    #[test]
    fn test_field_table_matches_struct() {
        let full = serde_json::to_value(SeriesCreateRequest {
            id: Some(1),
            titulo: "Dark".to_string(),
            ano: 2017,
            genero: "Sci-Fi".to_string(),
            qtd_temporadas: 4,
        })
        .unwrap();
        let keys = full.as_object().unwrap();
        assert_eq!(SeriesCreateRequest::FIELDS.len(), keys.len());

        for (name, value) in keys {
            let spec = SeriesCreateRequest::FIELDS
                .iter()
                .find(|spec| spec.name == name.as_str())
                .unwrap_or_else(|| panic!("{name} is missing from FIELDS"));

            let expected_kind = if value.is_string() {
                FieldKind::String
            } else {
                FieldKind::Integer
            };
            assert_eq!(spec.kind, expected_kind, "{name} has the wrong kind");

            // serde rejects the payload without this key exactly when the field is non-Option
            let mut without = full.clone();
            without.as_object_mut().unwrap().remove(name);
            let serde_requires = serde_json::from_value::<SeriesCreateRequest>(without).is_err();
            assert_eq!(spec.required, serde_requires, "{name} required flag disagrees");
        }
    }
}
