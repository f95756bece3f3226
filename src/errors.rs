use thiserror::Error;

/// Erros possíveis na borda de importação (leitura de arquivo e configuração).
///
/// Os parsers em si nunca falham: registros ruins são descartados e datas
/// irreconhecíveis caem no horário de processamento.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Formato de arquivo não suportado pela biblioteca
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Tabela de categorias ───────────────────────────────────────────────────

    /// JSON da tabela de regras malformado
    #[error("Invalid category rules: {0}")]
    InvalidRules(#[from] serde_json::Error),

    /// Regra individual inválida (rótulo vazio, palavra-chave vazia)
    #[error("Invalid category rule: {0}")]
    InvalidRule(String),
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type ImportResult<T> = Result<T, ImportError>;
