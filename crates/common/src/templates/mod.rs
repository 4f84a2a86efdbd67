//! Document template generation
//!
//! Renders the three fixed consultancy documents (document checklist,
//! service contract draft, commercial proposal) as plain text. Rendering is
//! a pure function of the client, the consultancy profile and the reference
//! date, so the same inputs always produce the same document.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::db::models::{Client, Profile};
use crate::formatters::mask_document;

/// Line that separates the contract body from the signature blocks.
/// The print layout detection splits on this exact string.
pub const SIGNATURE_MARKER: &str = "__________________________________________";

/// The three document templates offered by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Checklist,
    Contrato,
    Proposta,
}

impl TemplateKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "checklist" => Some(Self::Checklist),
            "contrato" => Some(Self::Contrato),
            "proposta" => Some(Self::Proposta),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checklist => "checklist",
            Self::Contrato => "contrato",
            Self::Proposta => "proposta",
        }
    }
}

/// How a generated document should be laid out for printing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum PrintLayout {
    /// Contract-style document: body text followed by two side-by-side
    /// signature blocks (contratante on the left, contratada on the right)
    Signatures {
        body: String,
        left: String,
        right: String,
    },
    /// Anything else prints as-is
    Verbatim { content: String },
}

/// Splits a rendered document on the signature marker. Exactly two markers
/// (three parts) means a contract with both signature blocks; any other
/// count falls back to verbatim printing.
pub fn print_layout(content: &str) -> PrintLayout {
    let parts: Vec<&str> = content.split(SIGNATURE_MARKER).collect();
    if parts.len() == 3 {
        PrintLayout::Signatures {
            body: parts[0].to_string(),
            left: parts[1].trim().to_string(),
            right: parts[2].trim().to_string(),
        }
    } else {
        PrintLayout::Verbatim {
            content: content.to_string(),
        }
    }
}

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// dd/mm/yyyy
fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "12 de setembro de 2026"
fn long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    )
}

fn opt<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

fn opt_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Renders the requested template for a client
pub fn render(
    kind: TemplateKind,
    client: &Client,
    profile: Option<&Profile>,
    today: NaiveDate,
) -> String {
    match kind {
        TemplateKind::Checklist => render_checklist(client, profile, today),
        TemplateKind::Contrato => render_contract(client, profile, today),
        TemplateKind::Proposta => render_proposal(client, profile),
    }
}

fn render_checklist(client: &Client, profile: Option<&Profile>, today: NaiveDate) -> String {
    let sender = profile
        .and_then(|p| p.company_name.clone())
        .unwrap_or_else(|| "Equipe Licitamos".to_string());

    format!(
        "SOLICITAÇÃO DE DOCUMENTOS PARA LICITAÇÃO\n\
Cliente: {company}\n\
CNPJ: {cnpj}\n\
Data: {date}\n\
\n\
Prezados,\n\
\n\
Para darmos início à preparação da documentação e participação nos processos licitatórios, solicitamos o envio dos seguintes documentos atualizados:\n\
\n\
DOCUMENTAÇÃO JURÍDICA E FISCAL:\n\
[ ] Contrato Social (e última alteração, se houver)\n\
[ ] Documento do Representante Legal (RG/CPF ou CNH)\n\
[ ] Alvará de Funcionamento\n\
[ ] Certidão Simplificada (Junta Comercial)\n\
\n\
DADOS CADASTRAIS E ACESSO:\n\
[ ] Nome completo do representante que irá assinar\n\
[ ] Dados Bancários (Banco, Agência, Conta - Pessoa Jurídica)\n\
[ ] E-mail e Telefone de contato para o cadastro\n\
[ ] Certificado Digital (A1) ou Senha de Acesso GOV.BR\n\
\n\
QUALIFICAÇÃO ECONÔMICA E TÉCNICA:\n\
[ ] Balanço Patrimonial e DRE dos últimos 2 anos (com termos de abertura e fechamento)\n\
[ ] Atestados de Capacidade Técnica (emitidos por PJ)\n\
[ ] Registro em Conselhos de Classe da Empresa (CREA/CAU), se houver\n\
[ ] Registro em Conselhos de Classe do Técnico Responsável\n\
[ ] Comprovação de Vínculo do Técnico com a Empresa (se não for sócio)\n\
[ ] Papel Timbrado da Empresa (em arquivo digital)\n\
\n\
OBSERVAÇÃO:\n\
As Certidões Negativas (Federal, Estadual, Municipal, FGTS e Trabalhista) serão emitidas por nossa equipe, mas é imprescindível que a empresa esteja sem pendências financeiras nestes órgãos.\n\
\n\
Atenciosamente,\n\
{sender}",
        company = client.company_name,
        cnpj = mask_document(opt_empty(&client.cnpj)),
        date = short_date(today),
        sender = sender,
    )
}

fn render_contract(client: &Client, profile: Option<&Profile>, today: NaiveDate) -> String {
    let none = Profile {
        id: uuid::Uuid::nil(),
        company_name: None,
        cnpj: None,
        email_contact: None,
        phone: None,
        website: None,
        street: None,
        number: None,
        neighborhood: None,
        city: None,
        state: None,
        zip_code: None,
        representative_name: None,
        representative_cpf: None,
        bank_name: None,
        bank_agency: None,
        bank_account: None,
        pix_key: None,
        theme: String::new(),
        updated_at: chrono::Utc::now().fixed_offset(),
    };
    let p = profile.unwrap_or(&none);

    let contractor_address = format!(
        "{}, {}, {}, {}/{}, CEP: {}",
        opt(&p.street, "Rua..."),
        opt(&p.number, "s/n"),
        opt(&p.neighborhood, "Bairro"),
        opt(&p.city, "Cidade"),
        opt(&p.state, "UF"),
        opt(&p.zip_code, "..."),
    );
    let bank_info = format!(
        "Banco: {}, Ag: {}, Conta: {}, PIX: {}",
        opt(&p.bank_name, "..."),
        opt(&p.bank_agency, "..."),
        opt(&p.bank_account, "..."),
        opt(&p.pix_key, "..."),
    );

    format!(
        "CONTRATO DE PRESTAÇÃO DE SERVIÇOS PARA PREPARAÇÃO DE DOCUMENTAÇÃO E PARTICIPAÇÃO EM LICITAÇÕES.\n\
\n\
Pelo presente instrumento particular de contrato de prestação de serviços, de um lado:\n\
\n\
CONTRATADO: {contractor}, inscrita no CNPJ sob o nº {contractor_cnpj}, com sede em {contractor_address}, neste ato representada por {representative}, CPF {representative_cpf}.\n\
\n\
CONTRATANTE: {company}, inscrita no CNPJ sob o nº {cnpj}, com sede em {street}, {number}, {neighborhood}, {city}/{state}, CEP: {zip}, neste ato representada por seu responsável legal.\n\
\n\
As partes têm entre si, justas e contratadas, a celebração do presente Contrato de Prestação de Serviços, que se regerá pelas seguintes cláusulas:\n\
\n\
CLÁUSULA PRIMEIRA – DO OBJETO\n\
\n\
O presente contrato tem como objeto a prestação de serviços de assessoria e apoio na preparação de documentação e participação em licitações, abrangendo as seguintes atividades:\n\
- Busca de Editais: pesquisa regular em fontes de informação sobre editais relacionados ao segmento da empresa, incluindo plataformas governamentais, jornais e portais específicos.\n\
- Identificação de oportunidades de licitação que atendam aos interesses e necessidades da empresa.\n\
- Análise de Editais: estudo detalhado dos editais encontrados, incluindo requisitos técnicos, prazos e condições de participação.\n\
- Elaboração de relatórios resumidos sobre as oportunidades identificadas, destacando informações relevantes e possíveis riscos.\n\
- Elaboração de documentação: coordenar e elaborar toda a documentação necessária para a participação em licitações, incluindo certidões e declarações exigidas, propostas comerciais e técnicas, comprovações de regularidade fiscal e trabalhista e qualificações técnicas e operacionais do CONTRATANTE.\n\
- Acompanhamento da licitação: monitorar o andamento das licitações em que o CONTRATANTE esteja participando, garantindo que sejam respeitados todos os prazos e procedimentos estabelecidos nos editais.\n\
\n\
CLÁUSULA SEGUNDA – DAS OBRIGAÇÕES\n\
\n\
São obrigações do CONTRATANTE:\n\
- Fornecer todas as informações e documentos necessários para a prestação dos serviços;\n\
- Efetuar o pagamento no prazo estipulado;\n\
- Acompanhar as orientações dadas pelo CONTRATADO.\n\
\n\
São obrigações do CONTRATADO:\n\
- Prestar os serviços contratados com diligência e eficiência;\n\
- Manter sigilo sobre as informações obtidas durante a vigência deste contrato;\n\
- Informar ao CONTRATANTE sobre qualquer fato que possa influenciar a execução dos serviços e sobre o andamento do processo licitatório.\n\
\n\
CLÁUSULA TERCEIRA – DOS HONORÁRIOS\n\
\n\
Os serviços prestados serão remunerados na forma e nos valores ajustados entre as partes, mediante pagamento direto na conta do CONTRATADO ({bank_info}).\n\
\n\
CLÁUSULA QUARTA – DA VIGÊNCIA\n\
\n\
O presente contrato passará a vigorar a partir da data de sua assinatura e será válido pelo período de 12 (doze) meses, podendo ser prorrogado por igual período, mediante concordância expressa das partes.\n\
\n\
CLÁUSULA QUINTA – DA RESCISÃO CONTRATUAL\n\
\n\
Poderá o presente instrumento ser rescindido por qualquer das partes, devendo a parte desistente notificar a outra por escrito, mediante aviso prévio de 30 (trinta) dias.\n\
\n\
E por estarem justas e contratadas, as partes assinam o presente.\n\
\n\
Local e Data:\n\
{place_city}/{place_state}, {date}.\n\
\n\
{marker}\n\
{company}\n\
(Contratante)\n\
\n\
{marker}\n\
{contractor}\n\
{representative_line}\n\
(Contratada)\n",
        contractor = opt(&p.company_name, "CONTRATADA"),
        contractor_cnpj = opt(&p.cnpj, "..."),
        contractor_address = contractor_address,
        representative = opt(&p.representative_name, "..."),
        representative_cpf = opt(&p.representative_cpf, "..."),
        company = client.company_name,
        cnpj = mask_document(opt_empty(&client.cnpj)),
        street = opt_empty(&client.street),
        number = opt_empty(&client.number),
        neighborhood = opt_empty(&client.neighborhood),
        city = opt_empty(&client.city),
        state = opt_empty(&client.state),
        zip = opt_empty(&client.zip_code),
        bank_info = bank_info,
        place_city = opt(&p.city, "Cidade"),
        place_state = opt(&p.state, "UF"),
        date = long_date(today),
        marker = SIGNATURE_MARKER,
        representative_line = opt(&p.representative_name, ""),
    )
}

fn render_proposal(client: &Client, profile: Option<&Profile>) -> String {
    let sender = profile
        .and_then(|p| p.company_name.clone())
        .unwrap_or_else(|| "Licitamos Consultoria".to_string());
    let phone = profile
        .and_then(|p| p.phone.clone())
        .unwrap_or_default();

    format!(
        "PROPOSTA DE ASSESSORIA EM LICITAÇÕES\n\
Para: {company}\n\
\n\
Prezados Senhores,\n\
\n\
Temos o prazer de apresentar esta proposta, feita para atender às necessidades da sua empresa. Nosso objetivo é oferecer suporte de qualidade em licitações públicas. Combinamos nossa experiência em licitações com uma compreensão das suas necessidades, para simplificar o processo e aumentar seus resultados.\n\
\n\
ESCOPO DOS SERVIÇOS\n\
Nossa assessoria engloba um conjunto completo de atividades estratégicas, garantindo um acompanhamento integral e especializado:\n\
- Inteligência em Licitações: identificação proativa de licitações alinhadas ao seu negócio, maximizando suas oportunidades no mercado público.\n\
- Preparação da Documentação: organização e elaboração da documentação necessária, garantindo que sua proposta seja completa, atenda às exigências legais e seja competitiva.\n\
- Acompanhamento Integral do Processo: monitoramento de cada etapa do processo licitatório, desde a publicação do edital até a homologação, incluindo a elaboração de recursos quando necessário.\n\
- Suporte na Documentação Administrativa: elaboração de pedidos de esclarecimento, impugnações e recursos.\n\
\n\
INVESTIMENTO E CONDIÇÕES GERAIS\n\
\n\
Os valores e as condições de pagamento serão ajustados conforme o porte e as necessidades da empresa, podendo combinar mensalidade fixa e comissão por êxito sobre o valor dos contratos conquistados.\n\
\n\
Condições adicionais:\n\
- Despesas com viagens, hospedagem e materiais, quando necessárias, serão cobradas à parte, mediante apresentação de comprovantes.\n\
- O contrato de prestação de serviços terá duração inicial de 1 (um) ano, sem cláusula de fidelidade.\n\
\n\
Proposta válida por 10 dias.\n\
\n\
Atenciosamente,\n\
\n\
{sender}\n\
{phone}",
        company = client.company_name,
        sender = sender,
        phone = phone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_name: "Construtora Horizonte LTDA".into(),
            cnpj: Some("12345678000190".into()),
            status: "active".into(),
            contact_person: None,
            email: None,
            phone: None,
            website: None,
            street: Some("Av. Brasil".into()),
            number: Some("100".into()),
            neighborhood: Some("Centro".into()),
            city: Some("Itajaí".into()),
            state: Some("SC".into()),
            zip_code: Some("88301-000".into()),
            notes: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn sample_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            company_name: Some("Licitamos Assessoria".into()),
            cnpj: Some("98.765.432/0001-10".into()),
            email_contact: None,
            phone: Some("(47) 99999-0000".into()),
            website: None,
            street: Some("Rua das Palmeiras".into()),
            number: Some("42".into()),
            neighborhood: Some("Fazenda".into()),
            city: Some("Itajaí".into()),
            state: Some("SC".into()),
            zip_code: Some("88302-000".into()),
            representative_name: Some("Maria Souza".into()),
            representative_cpf: Some("123.456.789-00".into()),
            bank_name: Some("Banco do Brasil".into()),
            bank_agency: Some("1234".into()),
            bank_account: Some("56789-0".into()),
            pix_key: Some("98.765.432/0001-10".into()),
            theme: "system".into(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rendering_is_deterministic() {
        let client = sample_client();
        let profile = sample_profile();
        let today = date(2026, 8, 29);

        for kind in [
            TemplateKind::Checklist,
            TemplateKind::Contrato,
            TemplateKind::Proposta,
        ] {
            let a = render(kind, &client, Some(&profile), today);
            let b = render(kind, &client, Some(&profile), today);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn checklist_carries_masked_cnpj_and_short_date() {
        let content = render(
            TemplateKind::Checklist,
            &sample_client(),
            Some(&sample_profile()),
            date(2026, 8, 29),
        );
        assert!(content.contains("12.345.678/0001-90"));
        assert!(content.contains("Data: 29/08/2026"));
        assert!(content.contains("Atenciosamente,\nLicitamos Assessoria"));
    }

    #[test]
    fn contract_has_exactly_two_signature_markers() {
        let content = render(
            TemplateKind::Contrato,
            &sample_client(),
            Some(&sample_profile()),
            date(2026, 8, 29),
        );
        let count = content.matches(SIGNATURE_MARKER).count();
        assert_eq!(count, 2);
        assert!(content.contains("29 de agosto de 2026"));
    }

    #[test]
    fn contract_splits_into_side_by_side_signatures() {
        let content = render(
            TemplateKind::Contrato,
            &sample_client(),
            Some(&sample_profile()),
            date(2026, 8, 29),
        );
        match print_layout(&content) {
            PrintLayout::Signatures { body, left, right } => {
                assert!(body.contains("CLÁUSULA PRIMEIRA"));
                assert!(left.starts_with("Construtora Horizonte LTDA"));
                assert!(left.contains("(Contratante)"));
                assert!(right.contains("(Contratada)"));
                assert!(right.contains("Maria Souza"));
            }
            other => panic!("expected signature layout, got {other:?}"),
        }
    }

    #[test]
    fn checklist_and_proposal_print_verbatim() {
        for kind in [TemplateKind::Checklist, TemplateKind::Proposta] {
            let content = render(kind, &sample_client(), Some(&sample_profile()), date(2026, 8, 29));
            assert!(matches!(
                print_layout(&content),
                PrintLayout::Verbatim { .. }
            ));
        }
    }

    #[test]
    fn missing_profile_falls_back_to_placeholders() {
        let checklist = render(TemplateKind::Checklist, &sample_client(), None, date(2026, 8, 29));
        assert!(checklist.contains("Equipe Licitamos"));

        let contract = render(TemplateKind::Contrato, &sample_client(), None, date(2026, 8, 29));
        assert!(contract.contains("CONTRATADA, inscrita no CNPJ sob o nº ..."));

        let proposal = render(TemplateKind::Proposta, &sample_client(), None, date(2026, 8, 29));
        assert!(proposal.contains("Licitamos Consultoria"));
    }

    #[test]
    fn template_kind_parses_wire_names() {
        assert_eq!(TemplateKind::parse("checklist"), Some(TemplateKind::Checklist));
        assert_eq!(TemplateKind::parse("contrato"), Some(TemplateKind::Contrato));
        assert_eq!(TemplateKind::parse("proposta"), Some(TemplateKind::Proposta));
        assert_eq!(TemplateKind::parse("relatorio"), None);
    }

    #[test]
    fn signature_marker_is_42_underscores() {
        assert_eq!(SIGNATURE_MARKER.len(), 42);
        assert!(SIGNATURE_MARKER.chars().all(|c| c == '_'));
    }
}
