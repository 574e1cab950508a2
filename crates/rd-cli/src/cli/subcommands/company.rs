use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum CompanyCommands {
    /// Register a client company.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact_name: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
        #[arg(long)]
        contact_phone: Option<String>,
    },
    /// List companies by name.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a company by ID.
    Get { id: String },
}
