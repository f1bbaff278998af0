//! Label translation and localized timestamp formatting

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a language tag such as `en`, `es-ES` or `EN_us`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// strftime pattern of the locale's short date and time
    fn datetime_pattern(&self) -> &'static str {
        match self {
            Self::En => "%-m/%-d/%Y, %-I:%M:%S %p",
            Self::Es => "%-d/%-m/%Y, %-H:%M:%S",
        }
    }
}

/// Format a timestamp for display in the given zone and locale
pub fn format_start_time<Tz>(start: DateTime<Utc>, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    start
        .with_timezone(tz)
        .format(locale.datetime_pattern())
        .to_string()
}

/// Translation lookup keyed by string constants
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate a key. Unknown keys resolve to the key itself.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let translated: Option<&'a str> = match self.locale {
            Locale::En => english(key),
            Locale::Es => spanish(key).or_else(|| english(key)),
        };
        translated.unwrap_or(key)
    }
}

fn english(key: &str) -> Option<&'static str> {
    Some(match key {
        "labs.label" => "Labs",
        "labs.requests.label" => "Lab Requests",
        "labs.requests.new" => "New Lab Request",
        "labs.requests.error.unableToRequest" => "Unable to create new lab request.",
        "labs.requests.error.patientRequired" => "Patient is required.",
        "labs.requests.error.typeRequired" => "Type is required.",
        "labs.lab.code" => "Lab Code",
        "labs.lab.patient" => "Patient",
        "labs.lab.appointments" => "Appointments",
        "labs.lab.type" => "Type",
        "labs.lab.notes" => "Notes",
        "labs.lab.result" => "Result",
        "labs.lab.status" => "Status",
        "labs.lab.requestedOn" => "Requested On",
        "labs.lab.completedOn" => "Completed On",
        "labs.lab.canceledOn" => "Canceled On",
        "labs.status.requested" => "Requested",
        "labs.status.completed" => "Completed",
        "labs.status.canceled" => "Canceled",
        "labs.empty" => "No labs found",
        "labs.notFound" => "Lab not found",
        "states.error" => "Error",
        "states.loading" => "Loading...",
        "actions.save" => "Save",
        "actions.cancel" => "Cancel",
        _ => return None,
    })
}

fn spanish(key: &str) -> Option<&'static str> {
    Some(match key {
        "labs.label" => "Laboratorios",
        "labs.requests.label" => "Solicitudes de laboratorio",
        "labs.requests.new" => "Nueva solicitud de laboratorio",
        "labs.requests.error.unableToRequest" => {
            "No se pudo crear la solicitud de laboratorio."
        }
        "labs.requests.error.patientRequired" => "El paciente es obligatorio.",
        "labs.requests.error.typeRequired" => "El tipo es obligatorio.",
        "labs.lab.code" => "Código",
        "labs.lab.patient" => "Paciente",
        "labs.lab.appointments" => "Citas",
        "labs.lab.type" => "Tipo",
        "labs.lab.notes" => "Notas",
        "labs.lab.result" => "Resultado",
        "labs.lab.status" => "Estado",
        "labs.lab.requestedOn" => "Solicitado el",
        "labs.lab.completedOn" => "Completado el",
        "labs.lab.canceledOn" => "Cancelado el",
        "labs.status.requested" => "Solicitado",
        "labs.status.completed" => "Completado",
        "labs.status.canceled" => "Cancelado",
        "labs.empty" => "No se encontraron laboratorios",
        "labs.notFound" => "Laboratorio no encontrado",
        "states.error" => "Error",
        "states.loading" => "Cargando...",
        "actions.save" => "Guardar",
        "actions.cancel" => "Cancelar",
        _ => return None,
    })
}
