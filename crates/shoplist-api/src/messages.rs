//! Localized user-facing messages
//!
//! Only the error texts and the few labels shared with the error banner live
//! here; view labels are written inline in the components.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ConflictReason, Denial, Resource, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Cs,
    En,
    It,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Cs => "cs",
            Locale::En => "en",
            Locale::It => "it",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cs" | "cz" => Some(Locale::Cs),
            "en" => Some(Locale::En),
            "it" => Some(Locale::It),
            _ => None,
        }
    }

    /// Heading of the error banner
    pub fn error_title(&self) -> &'static str {
        match self {
            Locale::Cs => "Nastala chyba",
            Locale::En => "Something went wrong",
            Locale::It => "Si è verificato un errore",
        }
    }

    pub fn retry_label(&self) -> &'static str {
        match self {
            Locale::Cs => "Zkusit znovu",
            Locale::En => "Try again",
            Locale::It => "Riprova",
        }
    }
}

/// (cs, en, it)
type Texts = (&'static str, &'static str, &'static str);

fn pick(locale: Locale, texts: Texts) -> &'static str {
    match locale {
        Locale::Cs => texts.0,
        Locale::En => texts.1,
        Locale::It => texts.2,
    }
}

pub(crate) fn error_message(err: &ApiError, locale: Locale) -> &'static str {
    let texts: Texts = match err {
        ApiError::Validation(v) => match v {
            ValidationError::BlankListName => (
                "Název seznamu nesmí být prázdný",
                "List name must not be empty",
                "Il nome della lista non può essere vuoto",
            ),
            ValidationError::BlankItemName => (
                "Název položky nesmí být prázdný",
                "Item name must not be empty",
                "Il nome dell'elemento non può essere vuoto",
            ),
            ValidationError::EmailRequired => (
                "Zadejte emailovou adresu",
                "Please enter an email address",
                "Inserisci un indirizzo email",
            ),
            ValidationError::EmailInvalid(_) => (
                "Zadejte platnou emailovou adresu",
                "Please enter a valid email address",
                "Inserisci un indirizzo email valido",
            ),
            ValidationError::Rejected => (
                "Server odmítl neplatný požadavek",
                "The server rejected the request as invalid",
                "Il server ha rifiutato la richiesta non valida",
            ),
        },
        ApiError::NotFound(resource) => match resource {
            Resource::List(_) => ("Seznam nenalezen", "List not found", "Lista non trovata"),
            Resource::Item(_) => ("Položka nenalezena", "Item not found", "Elemento non trovato"),
            Resource::Member(_) => ("Člen nenalezen", "Member not found", "Membro non trovato"),
        },
        ApiError::Forbidden(denial) => match denial {
            Denial::NotOwner => (
                "Tuto akci může provést pouze vlastník seznamu",
                "Only the list owner can do this",
                "Solo il proprietario della lista può farlo",
            ),
            Denial::ListArchived => (
                "Archivovaný seznam nelze upravovat",
                "An archived list cannot be changed",
                "Una lista archiviata non può essere modificata",
            ),
            Denial::OwnerRemoval => (
                "Vlastníka seznamu nelze odebrat",
                "The list owner cannot be removed",
                "Il proprietario della lista non può essere rimosso",
            ),
            Denial::LastOwner => (
                "Seznam musí mít alespoň jednoho vlastníka",
                "A list needs at least one owner",
                "Una lista deve avere almeno un proprietario",
            ),
            Denial::Unspecified => (
                "K této akci nemáte oprávnění",
                "You are not allowed to do this",
                "Non hai i permessi per questa azione",
            ),
        },
        ApiError::Conflict(reason) => match reason {
            ConflictReason::DuplicateMember(_) => (
                "Tento uživatel už má přístup k seznamu",
                "This user already has access to the list",
                "Questo utente ha già accesso alla lista",
            ),
            ConflictReason::Unspecified => (
                "Požadavek koliduje s aktuálním stavem seznamu",
                "The request conflicts with the current state of the list",
                "La richiesta è in conflitto con lo stato attuale della lista",
            ),
        },
        ApiError::RateLimited => (
            "Příliš mnoho požadavků, zkuste to prosím za chvíli",
            "Too many requests, please try again shortly",
            "Troppe richieste, riprova tra poco",
        ),
        ApiError::Server { .. } => (
            "Chyba serveru, zkuste to prosím později",
            "Server error, please try again later",
            "Errore del server, riprova più tardi",
        ),
        ApiError::Network(_) => (
            "Nelze se připojit k serveru, zkontrolujte připojení k internetu",
            "Cannot reach the server, check your internet connection",
            "Impossibile raggiungere il server, controlla la connessione",
        ),
        ApiError::InvalidResponse(_) => (
            "Server vrátil neočekávanou odpověď",
            "The server returned an unexpected response",
            "Il server ha restituito una risposta inattesa",
        ),
    };
    pick(locale, texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_locale_codes_parse_back() {
        for locale in [Locale::Cs, Locale::En, Locale::It] {
            assert_eq!(Locale::parse(locale.as_str()), Some(locale));
        }
        assert_eq!(Locale::parse(" CZ "), Some(Locale::Cs));
    }

    #[test]
    fn test_list_not_found_message() {
        let err = ApiError::list_not_found(999_999);
        assert_eq!(err.message(Locale::Cs), "Seznam nenalezen");
        assert_eq!(err.message(Locale::En), "List not found");
        assert_eq!(err.message(Locale::It), "Lista non trovata");
    }

    #[test]
    fn test_each_kind_has_distinct_message() {
        let errors = [
            ApiError::Validation(ValidationError::Rejected),
            ApiError::Forbidden(Denial::Unspecified),
            ApiError::list_not_found(1),
            ApiError::Conflict(ConflictReason::Unspecified),
            ApiError::RateLimited,
            ApiError::Server { status: 500 },
            ApiError::Network("offline".into()),
        ];
        let kinds: std::collections::HashSet<ErrorKind> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());

        for locale in [Locale::Cs, Locale::En, Locale::It] {
            let texts: std::collections::HashSet<_> =
                errors.iter().map(|e| e.message(locale)).collect();
            assert_eq!(texts.len(), errors.len(), "duplicate text for {:?}", locale);
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("cz"), Some(Locale::Cs));
        assert_eq!(Locale::parse("de"), None);
    }
}
