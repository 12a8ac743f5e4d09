use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use strum::{AsRefStr, EnumString, VariantArray};

use crate::{
    routes::AppState,
    template::{NotFoundTemplate, Template},
};

/// Call-to-action buttons of the landing page that open a WhatsApp chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, VariantArray)]
#[strum(serialize_all = "kebab-case")]
pub enum CtaIntent {
    Login,
    StartNow,
    AccessPanel,
    CreateStorefront,
    Transform,
    SellMore,
    FreePlan,
    ProPlan,
}

impl CtaIntent {
    pub fn message(&self) -> &'static str {
        match self {
            CtaIntent::Login => "Olá! Já sou cliente e gostaria de acessar meu painel.",
            CtaIntent::StartNow => {
                "Olá! Vi o site e quero saber como começar a usar o Doce Encomenda."
            }
            CtaIntent::AccessPanel => "Olá! Gostaria de acessar meu painel de confeiteira.",
            CtaIntent::CreateStorefront => "Olá! Quero criar minha vitrine digital agora.",
            CtaIntent::Transform => {
                "Olá! Vi o site e quero transformar meu negócio com a vitrine digital."
            }
            CtaIntent::SellMore => {
                "Olá! Cansei de pagar taxas para marketplaces. Quero vender com lucro total no Doce Encomenda."
            }
            CtaIntent::FreePlan => "Olá! Gostaria de começar no plano Iniciante (Grátis).",
            CtaIntent::ProPlan => {
                "Olá! Quero profissionalizar meu negócio com o plano Pro de R$ 39/mês."
            }
        }
    }
}

pub async fn open(
    template: Template,
    State(app): State<AppState>,
    Path(intent): Path<String>,
) -> impl IntoResponse {
    let Ok(intent) = CtaIntent::from_str(&intent) else {
        return (StatusCode::NOT_FOUND, template.render(NotFoundTemplate)).into_response();
    };

    let url = crate::try_page_response!(sync: app.whatsapp.url(intent.message()), template);

    tracing::info!(intent = intent.as_ref(), "whatsapp call-to-action opened");

    Redirect::to(url.as_str()).into_response()
}
