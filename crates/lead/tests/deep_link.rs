use doceencomenda_lead::{
    Ack, DeepLink, LeadForm, LeadInput, Notification, Outcome, SubmissionState,
    SubmissionStrategy, WhatsappConfig,
};
use doceencomenda_shared::{Error, Notice, SUBMISSION_FAILED};
use std::sync::Arc;

fn whatsapp(phone: Option<&str>) -> DeepLink {
    DeepLink::new(&WhatsappConfig {
        phone: phone.map(str::to_owned),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_deep_link_embeds_encoded_lead() -> anyhow::Result<()> {
    let lead = LeadInput::new("Maria", "maria@example.com")
        .validate_lead()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    let ack = whatsapp(Some("5511999990000")).submit(&lead).await?;
    let Ack::Opened(url) = ack else {
        anyhow::bail!("expected a deep link");
    };

    let url = url.as_str();
    assert!(url.starts_with("https://api.whatsapp.com/send?phone=5511999990000&text="));
    assert!(url.contains("Meu%20nome%20%C3%A9%20Maria"));
    assert!(url.contains("maria%40example.com"));
    assert!(!url.contains(' '));

    Ok(())
}

#[tokio::test]
async fn test_custom_base_url() -> anyhow::Result<()> {
    let deep_link = DeepLink::new(&WhatsappConfig {
        phone: Some("5511999990000".to_owned()),
        base_url: "https://wa.example.com/send/".to_owned(),
    });

    let url = deep_link.url("Olá")?;
    assert_eq!(
        url.as_str(),
        "https://wa.example.com/send?phone=5511999990000&text=Ol%C3%A1"
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_phone_fails_without_link() -> anyhow::Result<()> {
    let lead = LeadInput::new("Maria", "maria@example.com")
        .validate_lead()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    let err = whatsapp(None).submit(&lead).await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(err.notice(), Notice::Key(SUBMISSION_FAILED));

    Ok(())
}

#[tokio::test]
async fn test_form_succeeds_optimistically_with_deep_link() {
    let form = LeadForm::new(Arc::new(whatsapp(Some("5511999990000"))));

    let outcome = form.submit("Maria", "maria@example.com").await;

    let Outcome::Submitted(ack) = outcome else {
        panic!("expected submission, got {outcome:?}");
    };
    assert!(ack.deep_link().is_some());
    assert_eq!(form.state().await, SubmissionState::Success);
}

#[tokio::test]
async fn test_form_without_phone_reports_generic_failure() {
    let form = LeadForm::new(Arc::new(whatsapp(Some(""))));

    let outcome = form.submit("Maria", "maria@example.com").await;

    assert_eq!(outcome, Outcome::Failed(Notice::Key(SUBMISSION_FAILED)));
    assert_eq!(form.state().await, SubmissionState::Error);
    assert_eq!(
        form.view().await.notification,
        Some(Notification::Error(Notice::Key(SUBMISSION_FAILED)))
    );
}
