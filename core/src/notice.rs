//! User-facing notifications.
//!
//! Remote failures are never shown verbatim: each operation maps to one fixed
//! message per locale.

/// Language of user-facing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "pt" | "pt-br" | "pt_br" => Ok(Locale::PtBr),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    LoadFailed,
    ListFailed,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    Created,
    Updated,
    Deleted,
}

/// A transient message for the user, such as a toast or status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(kind: NoticeKind) -> Self {
        let severity = match kind {
            NoticeKind::Created | NoticeKind::Updated | NoticeKind::Deleted => Severity::Success,
            _ => Severity::Error,
        };
        Self { severity, kind }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        use NoticeKind::*;
        match (locale, self.kind) {
            (Locale::En, LoadFailed) => "Failed to load person",
            (Locale::En, ListFailed) => "Failed to load persons",
            (Locale::En, CreateFailed) => "Failed to create person",
            (Locale::En, UpdateFailed) => "Failed to update person",
            (Locale::En, DeleteFailed) => "Failed to delete person",
            (Locale::En, Created) => "Person created successfully",
            (Locale::En, Updated) => "Person updated successfully",
            (Locale::En, Deleted) => "Person deleted successfully",
            (Locale::PtBr, LoadFailed) => "Erro ao carregar pessoa",
            (Locale::PtBr, ListFailed) => "Erro ao carregar pessoas",
            (Locale::PtBr, CreateFailed) => "Erro ao criar pessoa",
            (Locale::PtBr, UpdateFailed) => "Erro ao atualizar pessoa",
            (Locale::PtBr, DeleteFailed) => "Erro ao deletar pessoa",
            (Locale::PtBr, Created) => "Pessoa criada com sucesso",
            (Locale::PtBr, Updated) => "Pessoa atualizada com sucesso",
            (Locale::PtBr, Deleted) => "Pessoa deletada com sucesso",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_kind() {
        assert!(Notice::new(NoticeKind::UpdateFailed).is_error());
        assert!(!Notice::new(NoticeKind::Created).is_error());
    }

    #[test]
    fn every_failure_has_a_distinct_message() {
        let kinds = [
            NoticeKind::LoadFailed,
            NoticeKind::ListFailed,
            NoticeKind::CreateFailed,
            NoticeKind::UpdateFailed,
            NoticeKind::DeleteFailed,
        ];
        for locale in [Locale::En, Locale::PtBr] {
            let mut messages: Vec<_> = kinds.iter().map(|k| Notice::new(*k).message(locale)).collect();
            messages.sort();
            messages.dedup();
            assert_eq!(messages.len(), kinds.len());
        }
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
