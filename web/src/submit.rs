use common::{
    check_form, validate_form, Clock, FormValues, Prediction, PredictionRequest, Predictor,
    RandomSource, Toast, ValidationReport,
};
use serde::Serialize;

/// Everything the page needs to render after a submit: inline field errors,
/// the result (if any) and the toast to show.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SubmitOutcome {
    pub report: ValidationReport,
    pub prediction: Option<Prediction>,
    pub toast: Toast,
}

/// First half of a submit: reject invalid forms before any delay starts.
pub fn validate_step(form: &FormValues) -> Result<PredictionRequest, SubmitOutcome> {
    validate_form(form).map_err(|error| SubmitOutcome {
        report: error.report.clone(),
        prediction: None,
        toast: Toast::for_error(&error.into()),
    })
}

/// Second half of a submit, run once the simulated latency has elapsed.
pub fn predict_step<C: Clock, S: RandomSource>(
    form: &FormValues,
    request: &PredictionRequest,
    predictor: &Predictor<C>,
    source: &mut S,
) -> SubmitOutcome {
    let report = check_form(form);
    match predictor.predict_with_breakdown(request, source) {
        Ok(prediction) => SubmitOutcome {
            report,
            prediction: Some(prediction),
            toast: Toast::prediction_complete(),
        },
        Err(error) => SubmitOutcome {
            report,
            prediction: None,
            toast: Toast::for_error(&error),
        },
    }
}
