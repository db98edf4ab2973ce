//! Customer- and operator-facing message texts (pt-BR).

use super::extraction::ClosurePayload;
use super::foundation::SenderId;

/// Sent to an operator whose offer command could not be parsed.
pub const INCOMPLETE_COMMAND: &str = "⚠️ Dados incompletos. Envie: CPF, Telefone, Valor";

/// Returned by the responder whenever the model pipeline fails.
pub const FALLBACK_REPLY: &str =
    "Desculpe, o sistema está processando muitas solicitações. Pode repetir por favor?";

/// Offer relayed to the customer.
pub fn offer(amount: &str) -> String {
    format!(
        "Boas notícias! 🎉\n\n\
         Consegui a liberação aqui. Tem disponível para você o valor de \
         *R$ {amount}* para cair hoje mesmo na sua conta.\n\n\
         Podemos seguir com a contratação?"
    )
}

/// Acknowledgment back to the operator after an offer was relayed.
pub fn offer_confirmation(amount: &str, digits: &str) -> String {
    format!("✅ Oferta de R$ {amount} enviada para {digits}!")
}

/// Alert asking support to run a simulation.
pub fn simulation_alert(note: &str, sender: &SenderId) -> String {
    format!("🚨 *SIMULAÇÃO*\n📝 Dados: {note}\n📱 Cliente: {sender}")
}

/// Alert asking support to pay out a closed deal.
pub fn closure_alert(payload: &ClosurePayload, sender: &SenderId) -> String {
    format!(
        "💰 *FECHAMENTO DETECTADO*\n\n\
         🏦 *Banco:* {}\n\
         🏢 *Agência:* {}\n\
         💳 *Conta:* {}\n\
         📱 *Cliente:* {}\n\n\
         ✅ *Ação:* Proceder com o pagamento.",
        payload.bank, payload.branch, payload.account, sender
    )
}
