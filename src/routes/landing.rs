use axum::response::IntoResponse;
use time::OffsetDateTime;

use crate::routes::lead::LeadFormTemplate;
use crate::template::{Template, filters};

pub struct FeatureCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub delay_ms: u16,
}

pub struct PricingTier {
    pub name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub pitch: &'static str,
    pub perks: &'static [&'static str],
    pub cta_label: &'static str,
    pub cta_intent: &'static str,
    pub highlight: Option<&'static str>,
}

pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FEATURES: [FeatureCard; 3] = [
    FeatureCard {
        icon: "message-square-off",
        title: "Chega de Curiosos",
        description: "Pare de enviar cardápio para quem some. Sua vitrine profissional filtra os reais compradores e automatiza o processo.",
        delay_ms: 100,
    },
    FeatureCard {
        icon: "banknote",
        title: "Pagamento no seu Controle",
        description: "O sistema garante o recebimento do sinal antes de você ligar o forno. O dinheiro cai direto para você, sem intermediários.",
        delay_ms: 200,
    },
    FeatureCard {
        icon: "layout-dashboard",
        title: "Dashboard de Gestão",
        description: "Abandone o papel. Tenha organização real de clientes, produtos e faturamento em um painel que é a sua casa digital.",
        delay_ms: 300,
    },
];

pub const SOLUTION_ITEMS: [&str; 5] = [
    "Seu Perfil Próprio com vitrine de produtos e filtros",
    "Agenda Inteligente: O cliente reserva apenas o que você disponibiliza",
    "Checkout Integrado: Pagamento automático e seguro",
    "Gestão de Clientes: Saiba quem compra e quanto você lucra",
    "Faturamento Real: Dashboard com histórico completo de vendas",
];

pub const PRICING: [PricingTier; 2] = [
    PricingTier {
        name: "Iniciante Digital",
        price: "Grátis",
        period: "/sempre",
        pitch: "Para quem está saindo do papel e quer começar com organização.",
        perks: &[
            "Vitrine com seus produtos",
            "Até 15 pedidos automáticos/mês",
            "Link personalizado da sua marca",
        ],
        cta_label: "Começar Agora",
        cta_intent: "free-plan",
        highlight: None,
    },
    PricingTier {
        name: "Profissional",
        price: "R$ 39",
        period: "/mês",
        pitch: "Para a empresária que quer escalar e vender sem limites.",
        perks: &[
            "Pedidos e Vendas Ilimitadas",
            "Dashboard de Faturamento Real",
            "Filtros e Categorias Inteligentes",
            "Suporte VIP para Negócios",
        ],
        cta_label: "Escalar meu Faturamento",
        cta_intent: "pro-plan",
        highlight: Some("DOMÍNIO TOTAL"),
    },
];

pub const FAQ: [FaqItem; 4] = [
    FaqItem {
        question: "O dinheiro cai direto para mim?",
        answer: "Sim! Não somos intermediários de pagamento. O cliente paga você diretamente via Pix ou cartão integrado, e o dinheiro é seu na hora.",
    },
    FaqItem {
        question: "Vou ter meu próprio link?",
        answer: "Sim. Você terá um link profissional (ex: doceencomenda.com/suamarca) para colocar na sua bio do Instagram e WhatsApp.",
    },
    FaqItem {
        question: "Eu consigo controlar minha agenda?",
        answer: "Totalmente. Você define quais dias e horários atende. Se lotar, o sistema bloqueia automaticamente para novos pedidos.",
    },
    FaqItem {
        question: "Preciso de computador?",
        answer: "Não. O Doce Encomenda foi feito para você gerir todo o seu negócio digital direto pelo celular.",
    },
];

#[derive(askama::Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub lead_form: String,
    pub toast: Option<String>,
    pub features: &'static [FeatureCard],
    pub solution_items: &'static [&'static str],
    pub pricing: &'static [PricingTier],
    pub faq: &'static [FaqItem],
    pub year: i32,
}

impl LandingTemplate {
    pub fn new(lead_form: String, toast: Option<String>) -> Self {
        Self {
            lead_form,
            toast,
            features: &FEATURES,
            solution_items: &SOLUTION_ITEMS,
            pricing: &PRICING,
            faq: &FAQ,
            year: OffsetDateTime::now_utc().year(),
        }
    }
}

pub async fn page(template: Template) -> impl IntoResponse {
    let lead_form = template.to_string(LeadFormTemplate::fresh());

    template.render(LandingTemplate::new(lead_form, None))
}
