use super::ForecastKind;

/// Состояние диалога одного чата
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// Выбранный тип прогноза, ожидаем название города
    pub forecast_stage: Option<ForecastKind>,
    /// Следующее текстовое сообщение уходит в GPT
    pub awaiting_question: bool,
    /// Последний успешно полученный прогноз (для советов)
    pub last_weather_summary: Option<String>,
}

impl UserState {
    /// Не более одного «взведённого» сценария одновременно
    pub fn has_single_armed_flow(&self) -> bool {
        !(self.forecast_stage.is_some() && self.awaiting_question)
    }

    /// Полный сброс к начальному состоянию (/start)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.forecast_stage.is_none() && !self.awaiting_question
    }
}
