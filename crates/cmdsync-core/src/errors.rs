use thiserror::Error;

/// Result type alias using CommandError
pub type Result<T> = std::result::Result<T, CommandError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by the command registry and its observers. Each kind maps to a
/// stable error code that can be used for programmatic error handling,
/// testing, and user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Registry
    NotFound,
    DuplicateName,
    InvalidName,
    TypeNotFound,
    DuplicateGoal,

    // Lifecycle
    NotLoaded,
    AlreadyLoaded,

    // Menu wiring
    SurfaceNotFound,

    // Integration
    ExternalService,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateName => "ERR_DUPLICATE_NAME",
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::TypeNotFound => "ERR_TYPE_NOT_FOUND",
            ExErrorKind::DuplicateGoal => "ERR_DUPLICATE_GOAL",
            ExErrorKind::NotLoaded => "ERR_NOT_LOADED",
            ExErrorKind::AlreadyLoaded => "ERR_ALREADY_LOADED",
            ExErrorKind::SurfaceNotFound => "ERR_SURFACE_NOT_FOUND",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (command name, goal id, type id or surface id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for command registry operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    // ===== Registry Errors =====
    /// No command with this name is registered
    #[error("Command not found: {name}")]
    NotFound { name: String },

    /// No unique name could be produced, or the requested name is taken
    #[error("Command name already in use: {name}")]
    DuplicateName { name: String },

    /// Command name is empty or whitespace-only
    #[error("Invalid command name: {reason}")]
    InvalidName { reason: String },

    /// The type provider does not know this command type
    #[error("Command type not found: {type_id}")]
    TypeNotFound { type_id: String },

    /// A goal with this id is already registered
    #[error("Command goal already registered: {goal_id}")]
    DuplicateGoal { goal_id: String },

    /// The type provider failed while resolving a template
    #[error("Command type provider failed for {type_id}: {message}")]
    Provider { type_id: String, message: String },

    // ===== Lifecycle Errors =====
    /// A mutation was attempted before the initial load
    #[error("Commands are not loaded yet")]
    NotLoaded,

    /// The initial load was attempted twice
    #[error("Commands are already loaded")]
    AlreadyLoaded,

    // ===== Menu Errors =====
    /// A menu surface is missing from the action host or is not a group
    #[error("Menu surface not found or not a group: {surface_id}")]
    SurfaceNotFound { surface_id: String },

    // ===== Generic Errors =====
    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

/// Conversion from CommandError to ExError
impl From<CommandError> for ExError {
    fn from(err: CommandError) -> Self {
        let message = err.to_string();
        match err {
            CommandError::NotFound { name } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(name)
                .with_message(message),

            CommandError::DuplicateName { name } => ExError::new(ExErrorKind::DuplicateName)
                .with_entity_id(name)
                .with_message(message),

            CommandError::InvalidName { .. } => {
                ExError::new(ExErrorKind::InvalidName).with_message(message)
            }

            CommandError::TypeNotFound { type_id } => ExError::new(ExErrorKind::TypeNotFound)
                .with_entity_id(type_id)
                .with_message(message),

            CommandError::DuplicateGoal { goal_id } => ExError::new(ExErrorKind::DuplicateGoal)
                .with_entity_id(goal_id)
                .with_op("register_goal")
                .with_message(message),

            CommandError::Provider { type_id, .. } => ExError::new(ExErrorKind::ExternalService)
                .with_entity_id(type_id)
                .with_op("resolve_template")
                .with_message(message),

            CommandError::NotLoaded => ExError::new(ExErrorKind::NotLoaded).with_message(message),

            CommandError::AlreadyLoaded => ExError::new(ExErrorKind::AlreadyLoaded)
                .with_op("load_commands")
                .with_message(message),

            CommandError::SurfaceNotFound { surface_id } => {
                ExError::new(ExErrorKind::SurfaceNotFound)
                    .with_entity_id(surface_id)
                    .with_op("install_actions")
                    .with_message(message)
            }

            CommandError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
        }
    }
}

impl From<toml::de::Error> for CommandError {
    fn from(err: toml::de::Error) -> Self {
        CommandError::Config {
            reason: err.to_string(),
        }
    }
}
