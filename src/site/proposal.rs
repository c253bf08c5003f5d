//! # Propuestas de proyectos culturales

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::middleware::ErrorLogExt;
use crate::backend::models::ProjectContactPayload;
use crate::backend::PublicApi;
use crate::models::{ProjectProposal, ProposalStatus};

pub const SUBMITTED_RESET_DELAY: Duration = Duration::from_secs(4);

/// Fichero adjunto ya leído en memoria
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// `data:<mime>;base64,<contenido>`
    pub fn to_data_url(&self) -> String {
        let mime = if self.mime.is_empty() {
            "application/octet-stream"
        } else {
            self.mime.as_str()
        };
        format!("data:{};base64,{}", mime, STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub discipline: String,
    pub description: String,
    pub bio: String,
    pub socials: String,
    pub terms_accepted: bool,
    #[serde(skip)]
    pub attachment: Option<Attachment>,
    pub submitted: bool,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_proposal(&self, now: DateTime<Utc>) -> ProjectProposal {
        ProjectProposal {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            title: self.title.clone(),
            discipline: self.discipline.clone(),
            description: self.description.clone(),
            bio: self.bio.clone(),
            socials: self.socials.clone(),
            has_file: self.attachment.is_some(),
            file_base64: self.attachment.as_ref().map(Attachment::to_data_url),
            created_at: now.format("%Y-%m-%d").to_string(),
            status: ProposalStatus::New,
        }
    }

    /// Registra la propuesta y la envía al backend.
    ///
    /// Sin aceptar las condiciones no se hace nada. La propuesta se añade al
    /// principio de `proposals` aunque el envío falle.
    pub async fn submit_proposal(
        &mut self,
        api: &dyn PublicApi,
        proposals: &mut Vec<ProjectProposal>,
        now: DateTime<Utc>,
    ) -> Option<ProjectProposal> {
        if !self.terms_accepted {
            return None;
        }

        let proposal = self.to_proposal(now);
        proposals.insert(0, proposal.clone());
        self.submitted = true;

        let payload = contact_payload(&proposal);
        if let Some(receipt) = api
            .contact_projects(&payload)
            .await
            .ignore_error("sending project proposal")
        {
            tracing::info!(id = %receipt.id, status = %receipt.status, "Propuesta enviada");
        }

        Some(proposal)
    }

    /// Espera el retardo fijo y deja el formulario en blanco
    pub async fn settle(&mut self) {
        tokio::time::sleep(SUBMITTED_RESET_DELAY).await;
        *self = Self::default();
    }
}

/// Cuerpo de `contacts/projects` para una propuesta
pub fn contact_payload(proposal: &ProjectProposal) -> ProjectContactPayload {
    ProjectContactPayload {
        name: proposal.name.clone(),
        email: proposal.email.clone(),
        phone: Some(proposal.phone.clone()).filter(|p| !p.is_empty()),
        company: None,
        subject: proposal.title.clone(),
        message: format!("{}\n\n{}\n\n{}", proposal.description, proposal.bio, proposal.socials),
        consent: true,
        source: "website".to_string(),
        proposal_title: proposal.title.clone(),
        proposal_discipline: proposal.discipline.clone(),
        proposal_description: proposal.description.clone(),
        proposal_bio: proposal.bio.clone(),
        proposal_socials: proposal.socials.clone(),
        proposal_has_file: proposal.has_file,
        proposal_file_base64: proposal.file_base64.clone(),
    }
}
