//! Luna, the scripted FAQ assistant
//!
//! Replies are a closed table keyed by [`Intent`]; [`classify`] picks the
//! intent by keyword and is kept apart from the wording so each can be tested
//! on its own.

pub const GREETING: &str = "🌟 Oi amiguinho! Eu sou a Luna, sua assistente virtual especial! 🤖💜 Estou aqui para ajudar você e sua família com dúvidas sobre autismo, desenvolvimento infantil e como usar nossa plataforma. O que você gostaria de saber?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Signs,
    Development,
    Games,
    Reports,
    Help,
    HowToUse,
    Age,
    Time,
    Greeting,
    Thanks,
    Goodbye,
    Fallback,
}

/// Keywords per intent, checked in this order; the first hit wins
const KEYWORDS: [(Intent, &[&str]); 11] = [
    (Intent::Signs, &["sinais", "sintomas", "autismo"]),
    (Intent::Development, &["desenvolvimento", "marcos", "idade"]),
    (Intent::Games, &["jogos", "atividades", "como funciona"]),
    (Intent::Reports, &["relatório", "resultado", "diagnóstico"]),
    (Intent::Help, &["ajuda", "médico", "profissional"]),
    (Intent::HowToUse, &["como usar", "tutorial", "começar"]),
    (Intent::Age, &["quantos anos", "que idade", "criança pequena"]),
    (Intent::Time, &["tempo", "quanto jogar", "duração"]),
    (Intent::Greeting, &["olá", "oi", "hello", "luna"]),
    (Intent::Thanks, &["obrigado", "obrigada", "valeu"]),
    (Intent::Goodbye, &["tchau", "até logo", "bye"]),
];

/// Plain substring matching on the lower-cased message
pub fn classify(message: &str) -> Intent {
    let message = message.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| message.contains(w)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Fallback)
}

pub fn response(intent: Intent, message: &str) -> String {
    let text = match intent {
        Intent::Signs => "🔍 Os primeiros sinais de autismo podem incluir: dificuldade na comunicação social, comportamentos repetitivos, sensibilidade sensorial, dificuldade com mudanças na rotina. 🚨 Lembre-se: apenas profissionais podem fazer diagnósticos! Se você tem dúvidas, converse com um pediatra. 👩‍⚕️",
        Intent::Development => "📈 O desenvolvimento infantil é como uma aventura única para cada criança! 🌱 Marcos importantes incluem: sorrir socialmente (2-3 meses), balbuciar (6 meses), primeiras palavras (12 meses), andar (12-18 meses). Cada criança tem seu próprio ritmo especial! ⭐",
        Intent::Games => "🎮 Nossos jogos são super especiais! Eles observam: memória visual 🧠, reconhecimento de padrões 🔄, coordenação 🎯, atenção 👀, e sequenciamento 📝. São como brincadeiras que ajudam a entender como a criança aprende e se desenvolve! 🌈",
        Intent::Reports => "📊 Os relatórios mostram como a criança se saiu nos jogos, mas 🚨 NÃO são diagnósticos médicos! São como um \"diário de brincadeiras\" que você pode mostrar para médicos e terapeutas. Eles ajudam os profissionais a entender melhor a criança! 👨‍⚕️",
        Intent::Help => "🆘 Se você suspeita de autismo, procure ajuda de: pediatra 👩‍⚕️, neuropediatra 🧠, psicólogo infantil 🧸 ou psiquiatra infantil. O diagnóstico precoce é como encontrar a chave certa para ajudar a criança! 🗝️✨",
        Intent::HowToUse => "📱 Para usar nossa plataforma: 1️⃣ Crie um perfil para a criança, 2️⃣ Escolha um jogo divertido, 3️⃣ Deixe a criança brincar, 4️⃣ Veja os resultados nos relatórios! É fácil e divertido! 🎉",
        Intent::Age => "👶 Nossos jogos são perfeitos para crianças de 2 a 8 anos! Cada jogo tem níveis diferentes de dificuldade. Se a criança é muito pequena, um adulto pode ajudar! 🤝",
        Intent::Time => "⏰ Recomendamos sessões de 10-15 minutos para não cansar a criança. O importante é que seja divertido, não uma obrigação! Se a criança não quiser jogar, tudo bem - tente outro dia! 😊",
        Intent::Greeting => "👋 Oi! Que bom falar com você! 🌟 Sou a Luna e adoro ajudar famílias! O que você gostaria de saber sobre autismo, desenvolvimento infantil ou nossos jogos? 🤗",
        Intent::Thanks => "🥰 Fico muito feliz em ajudar! Estou sempre aqui quando precisar! 💜 Lembre-se: para questões médicas específicas, sempre consulte um profissional de saúde. Cuide-se! ✨",
        Intent::Goodbye => "👋 Tchau! Foi um prazer conversar com você! Volte sempre que quiser! Estarei aqui esperando! 🌈💜",
        Intent::Fallback => {
            return format!(
                "🤔 Entendi sua pergunta sobre \"{}\"! Posso ajudar com informações sobre:\n\n\
🔍 Sinais de autismo\n\
📈 Desenvolvimento infantil\n\
🎮 Como usar nossos jogos\n\
📊 Interpretação de relatórios\n\
🆘 Onde buscar ajuda profissional\n\n\
Sobre o que você gostaria de saber mais? 😊",
                message
            );
        }
    };
    text.to_string()
}

/// Luna's answer, or `None` for a blank message
pub fn reply(message: &str) -> Option<String> {
    if message.trim().is_empty() {
        return None;
    }
    Some(response(classify(message), message))
}
