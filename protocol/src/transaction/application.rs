//! Application call builder.
//!
//! One builder covers every application action: the on-completion code
//! selects between a plain call, opt-in, close-out, clear-state, update and
//! delete, and an application id of zero means "create".

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::builder::{
    check_count, common_setters, decode_required, Common, SuggestedParams, Transaction,
};
use super::error::TxnError;
use super::types::{ApplicationCallFields, OnCompletion, StateSchema, TxnFields};

#[derive(Debug, Clone)]
enum Args {
    Raw(Vec<Vec<u8>>),
    Base64(Vec<String>),
}

/// Builds an application call.
#[derive(Debug, Clone)]
pub struct ApplicationCallBuilder {
    common: Common,
    application_id: u64,
    on_completion: OnCompletion,
    args: Args,
    accounts: Vec<String>,
    foreign_apps: Vec<u64>,
    foreign_assets: Vec<u64>,
    approval_program: Vec<u8>,
    clear_program: Vec<u8>,
    local_schema: StateSchema,
    global_schema: StateSchema,
}

impl ApplicationCallBuilder {
    /// A no-op call to `application_id` from `sender`.
    pub fn new(sender: &str, application_id: u64, params: SuggestedParams) -> Self {
        Self {
            common: Common::new(sender, params),
            application_id,
            on_completion: OnCompletion::NoOp,
            args: Args::Raw(Vec::new()),
            accounts: Vec::new(),
            foreign_apps: Vec::new(),
            foreign_assets: Vec::new(),
            approval_program: Vec::new(),
            clear_program: Vec::new(),
            local_schema: StateSchema::default(),
            global_schema: StateSchema::default(),
        }
    }

    /// Create a new application from its two programs.
    pub fn create(
        sender: &str,
        approval_program: Vec<u8>,
        clear_program: Vec<u8>,
        params: SuggestedParams,
    ) -> Self {
        Self::new(sender, 0, params).programs(approval_program, clear_program)
    }

    /// Replace the programs of `application_id`.
    pub fn update(
        sender: &str,
        application_id: u64,
        approval_program: Vec<u8>,
        clear_program: Vec<u8>,
        params: SuggestedParams,
    ) -> Self {
        Self::new(sender, application_id, params)
            .on_completion(OnCompletion::UpdateApplication)
            .programs(approval_program, clear_program)
    }

    common_setters!();

    /// Side effect on completion.
    pub fn on_completion(mut self, on_completion: OnCompletion) -> Self {
        self.on_completion = on_completion;
        self
    }

    /// When creating, opt the creator in within the same transaction.
    pub fn opt_in(self, opt_in: bool) -> Self {
        self.on_completion(if opt_in {
            OnCompletion::OptIn
        } else {
            OnCompletion::NoOp
        })
    }

    /// Arguments visible to the application logic.
    pub fn args(mut self, args: Vec<Vec<u8>>) -> Self {
        self.args = Args::Raw(args);
        self
    }

    /// Arguments as standard base64 strings, decoded at build time.
    pub fn args_base64<S: AsRef<str>>(mut self, args: &[S]) -> Self {
        self.args = Args::Base64(args.iter().map(|a| a.as_ref().to_string()).collect());
        self
    }

    /// Accounts, besides the sender, the logic may read.
    pub fn accounts<S: AsRef<str>>(mut self, accounts: &[S]) -> Self {
        self.accounts = accounts.iter().map(|a| a.as_ref().to_string()).collect();
        self
    }

    /// Applications whose global state the logic may read.
    pub fn foreign_apps(mut self, ids: Vec<u64>) -> Self {
        self.foreign_apps = ids;
        self
    }

    /// Assets whose parameters the logic may read.
    pub fn foreign_assets(mut self, ids: Vec<u64>) -> Self {
        self.foreign_assets = ids;
        self
    }

    /// Approval and clear-state programs.
    pub fn programs(mut self, approval: Vec<u8>, clear: Vec<u8>) -> Self {
        self.approval_program = approval;
        self.clear_program = clear;
        self
    }

    /// Per-account state limits. Immutable once the app exists.
    pub fn local_schema(mut self, schema: StateSchema) -> Self {
        self.local_schema = schema;
        self
    }

    /// Global state limits. Immutable once the app exists.
    pub fn global_schema(mut self, schema: StateSchema) -> Self {
        self.global_schema = schema;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Transaction, TxnError> {
        let sender = self.common.sender()?;
        let accounts = self
            .accounts
            .iter()
            .map(|a| decode_required("accounts", a))
            .collect::<Result<Vec<_>, _>>()?;
        let header = self.common.header(sender)?;

        let args = match self.args {
            Args::Raw(args) => args,
            Args::Base64(encoded) => encoded
                .iter()
                .map(|a| {
                    STANDARD
                        .decode(a)
                        .map_err(|source| TxnError::Base64 { field: "args", source })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let rules = self.common.rules();
        check_count("args", args.len(), rules.max_app_args)?;
        check_count("accounts", accounts.len(), rules.max_app_accounts)?;
        check_count("foreign_apps", self.foreign_apps.len(), rules.max_app_foreign_apps)?;
        check_count(
            "foreign_assets",
            self.foreign_assets.len(),
            rules.max_app_foreign_assets,
        )?;

        let needs_programs = self.application_id == 0
            || self.on_completion == OnCompletion::UpdateApplication;
        if needs_programs {
            if self.approval_program.is_empty() {
                return Err(TxnError::MissingRequiredField {
                    field: "approval_program",
                });
            }
            if self.clear_program.is_empty() {
                return Err(TxnError::MissingRequiredField {
                    field: "clear_program",
                });
            }
        }

        let fields = TxnFields::ApplicationCall(ApplicationCallFields {
            application_id: self.application_id,
            on_completion: self.on_completion,
            args,
            accounts,
            foreign_apps: self.foreign_apps,
            foreign_assets: self.foreign_assets,
            approval_program: self.approval_program,
            clear_program: self.clear_program,
            local_schema: self.local_schema,
            global_schema: self.global_schema,
        });
        self.common.finish(header, fields)
    }
}
