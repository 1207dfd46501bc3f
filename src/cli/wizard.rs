//! Step-by-step customer wizard
//!
//! Collects one customer's details over three input stages and shows the
//! prediction on a fourth. The stage machine (`WizardSession`) is plain data and
//! owns everything collected so far; the TUI (`WizardApp`) only edits form
//! buffers and submits them to the session.
//!
//! # Flow
//!
//! 1. Basic details: income, education, marital status
//! 2. Customer tenure (days), wine, fruit and meat spending
//! 3. Fish, sweets and gold spending
//! 4. Result, with Start Over returning to stage 1 and discarding all input
//!
//! There are no backward transitions.

use std::io::{stdout, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Terminal,
};
use thiserror::Error;

use crate::pipeline::{
    predict_single, AlignError, CustomerProfile, Education, InferenceContext, MaritalStatus,
    SinglePrediction, Spending, Thresholds,
};

// ============================================================================
// Stage Data
// ============================================================================

/// Fields collected at stage 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicDetails {
    pub income: f64,
    pub education: Education,
    pub marital_status: MaritalStatus,
}

/// Fields collected at stage 2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenureSpending {
    pub customer_tenure: u32,
    pub wines: f64,
    pub fruits: f64,
    pub meat: f64,
}

/// Fields collected at stage 3
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdditionalSpending {
    pub fish: f64,
    pub sweets: f64,
    pub gold: f64,
}

/// Current stage, carrying only what has been collected before it
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WizardStage {
    #[default]
    Basic,
    TenureSpending {
        basic: BasicDetails,
    },
    AdditionalSpending {
        basic: BasicDetails,
        tenure: TenureSpending,
    },
    Result {
        profile: CustomerProfile,
    },
}

impl WizardStage {
    /// 1-based stage position
    pub fn step(&self) -> u8 {
        match self {
            WizardStage::Basic => 1,
            WizardStage::TenureSpending { .. } => 2,
            WizardStage::AdditionalSpending { .. } => 3,
            WizardStage::Result { .. } => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStage::Basic => "Basic Details",
            WizardStage::TenureSpending { .. } => "Customer Tenure & Spending Details",
            WizardStage::AdditionalSpending { .. } => "Additional Spending Features",
            WizardStage::Result { .. } => "Prediction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("stage {submitted} details cannot be submitted at stage {current}")]
    WrongStage { submitted: u8, current: u8 },

    #[error("{field} must be a finite number >= 0")]
    InvalidAmount { field: &'static str },

    #[error("no result yet: the wizard is at stage {0}")]
    NotComplete(u8),

    #[error(transparent)]
    Align(#[from] AlignError),
}

fn check_amount(field: &'static str, value: f64) -> Result<f64, WizardError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(WizardError::InvalidAmount { field })
    }
}

// ============================================================================
// Session
// ============================================================================

/// One user's pass through the wizard. Sessions share nothing.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    stage: WizardStage,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &WizardStage {
        &self.stage
    }

    pub fn step(&self) -> u8 {
        self.stage.step()
    }

    /// Accept stage 1 and move to stage 2
    pub fn submit_basic(&mut self, basic: BasicDetails) -> Result<(), WizardError> {
        if !matches!(self.stage, WizardStage::Basic) {
            return Err(self.wrong_stage(1));
        }
        check_amount("Income", basic.income)?;
        self.stage = WizardStage::TenureSpending { basic };
        Ok(())
    }

    /// Accept stage 2 and move to stage 3
    pub fn submit_tenure_spending(&mut self, tenure: TenureSpending) -> Result<(), WizardError> {
        let basic = match self.stage {
            WizardStage::TenureSpending { basic } => basic,
            _ => return Err(self.wrong_stage(2)),
        };
        check_amount("Amount Spent on Wine", tenure.wines)?;
        check_amount("Amount Spent on Fruits", tenure.fruits)?;
        check_amount("Amount Spent on Meat Products", tenure.meat)?;
        self.stage = WizardStage::AdditionalSpending { basic, tenure };
        Ok(())
    }

    /// Accept stage 3, merge everything into a profile and move to stage 4
    pub fn submit_additional_spending(
        &mut self,
        additional: AdditionalSpending,
    ) -> Result<(), WizardError> {
        let (basic, tenure) = match self.stage {
            WizardStage::AdditionalSpending { basic, tenure } => (basic, tenure),
            _ => return Err(self.wrong_stage(3)),
        };
        check_amount("Amount Spent on Fish Products", additional.fish)?;
        check_amount("Amount Spent on Sweets", additional.sweets)?;
        check_amount("Amount Spent on Gold Products", additional.gold)?;

        let profile = CustomerProfile {
            income: basic.income,
            education: basic.education,
            marital_status: basic.marital_status,
            customer_tenure: tenure.customer_tenure,
            spending: Spending {
                wines: tenure.wines,
                fruits: tenure.fruits,
                meat: tenure.meat,
                fish: additional.fish,
                sweets: additional.sweets,
                gold: additional.gold,
            },
        };
        self.stage = WizardStage::Result { profile };
        Ok(())
    }

    /// The completed profile, present only at stage 4
    pub fn profile(&self) -> Option<&CustomerProfile> {
        match &self.stage {
            WizardStage::Result { profile } => Some(profile),
            _ => None,
        }
    }

    /// Return to stage 1, discarding everything collected
    pub fn start_over(&mut self) {
        self.stage = WizardStage::Basic;
    }

    /// Run the single-record computation on the completed profile
    pub fn evaluate(
        &self,
        ctx: &InferenceContext,
        thresholds: &Thresholds,
    ) -> Result<SinglePrediction, WizardError> {
        let profile = self
            .profile()
            .ok_or(WizardError::NotComplete(self.step()))?;
        Ok(predict_single(ctx, profile, thresholds)?)
    }

    fn wrong_stage(&self, submitted: u8) -> WizardError {
        WizardError::WrongStage {
            submitted,
            current: self.step(),
        }
    }
}

// ============================================================================
// Form State
// ============================================================================

const EDUCATION_OPTIONS: [&str; 5] = [
    Education::ALL[0].as_str(),
    Education::ALL[1].as_str(),
    Education::ALL[2].as_str(),
    Education::ALL[3].as_str(),
    Education::ALL[4].as_str(),
];

const MARITAL_OPTIONS: [&str; 4] = [
    MaritalStatus::ALL[0].as_str(),
    MaritalStatus::ALL[1].as_str(),
    MaritalStatus::ALL[2].as_str(),
    MaritalStatus::ALL[3].as_str(),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Non-negative decimal amount
    Amount,
    /// Non-negative whole number of days
    Days,
    /// One of a fixed set of options
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub input: String,
    pub selected: usize,
}

impl FormField {
    fn new(label: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            kind,
            input: String::new(),
            selected: 0,
        }
    }

    /// Parsed amount; an empty buffer counts as 0
    fn amount(&self) -> Result<f64, String> {
        if self.input.is_empty() {
            return Ok(0.0);
        }
        match self.input.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(format!("{}: enter a number >= 0", self.label)),
        }
    }

    fn days(&self) -> Result<u32, String> {
        if self.input.is_empty() {
            return Ok(0);
        }
        self.input
            .parse::<u32>()
            .map_err(|_| format!("{}: enter a whole number of days", self.label))
    }

    fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Choice(options) => options.get(self.selected).copied().unwrap_or("").to_string(),
            _ if self.input.is_empty() => "0".to_string(),
            _ => self.input.clone(),
        }
    }
}

/// Editable fields of the current input stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageForm {
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

impl StageForm {
    /// Blank form for a stage; stage 4 has no fields
    pub fn for_stage(stage: &WizardStage) -> Self {
        let fields = match stage {
            WizardStage::Basic => vec![
                FormField::new("Income (in USD)", FieldKind::Amount),
                FormField::new("Education", FieldKind::Choice(&EDUCATION_OPTIONS)),
                FormField::new("Marital Status", FieldKind::Choice(&MARITAL_OPTIONS)),
            ],
            WizardStage::TenureSpending { .. } => vec![
                FormField::new("Customer Tenure (days)", FieldKind::Days),
                FormField::new("Amount Spent on Wine (USD)", FieldKind::Amount),
                FormField::new("Amount Spent on Fruits (USD)", FieldKind::Amount),
                FormField::new("Amount Spent on Meat Products (USD)", FieldKind::Amount),
            ],
            WizardStage::AdditionalSpending { .. } => vec![
                FormField::new("Amount Spent on Fish Products (USD)", FieldKind::Amount),
                FormField::new("Amount Spent on Sweets (USD)", FieldKind::Amount),
                FormField::new("Amount Spent on Gold Products (USD)", FieldKind::Amount),
            ],
            WizardStage::Result { .. } => Vec::new(),
        };
        Self {
            fields,
            focus: 0,
            error: None,
        }
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn amount(&self, index: usize) -> Result<f64, String> {
        self.fields
            .get(index)
            .map_or(Ok(0.0), |field| field.amount())
    }

    fn selected(&self, index: usize) -> usize {
        self.fields.get(index).map_or(0, |field| field.selected)
    }

    /// Focus the first field that fails to parse
    fn focus_invalid(&mut self) {
        if let Some(index) = self.fields.iter().position(|f| match f.kind {
            FieldKind::Amount => f.amount().is_err(),
            FieldKind::Days => f.days().is_err(),
            FieldKind::Choice(_) => false,
        }) {
            self.focus = index;
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Action to take after handling a key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepAction {
    /// Stage input accepted
    NextStage,
    /// Returned to stage 1
    StartOver,
    /// User confirmed quitting
    Exit,
    /// Stay on the current stage
    Stay,
}

/// Wizard screen state around one session
pub struct WizardApp {
    pub session: WizardSession,
    pub form: StageForm,
    pub show_quit_confirm: bool,
    artifacts: Result<InferenceContext, String>,
    thresholds: Thresholds,
    outcome: Option<Result<SinglePrediction, String>>,
}

impl WizardApp {
    /// Artifacts are held as a result so a load failure still lets the stages render
    pub fn new(artifacts: Result<InferenceContext, String>, thresholds: Thresholds) -> Self {
        let session = WizardSession::new();
        let form = StageForm::for_stage(session.stage());
        Self {
            session,
            form,
            show_quit_confirm: false,
            artifacts,
            thresholds,
            outcome: None,
        }
    }

    /// Stage 4 result, or the error shown in its place
    pub fn outcome(&self) -> Option<&Result<SinglePrediction, String>> {
        self.outcome.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> StepAction {
        if self.show_quit_confirm {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return StepAction::Exit,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.show_quit_confirm = false;
                }
                _ => {}
            }
            return StepAction::Stay;
        }

        if matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) {
            self.show_quit_confirm = true;
            return StepAction::Stay;
        }

        if matches!(self.session.stage(), WizardStage::Result { .. }) {
            return self.handle_result_key(key);
        }
        self.handle_form_key(key)
    }

    fn handle_result_key(&mut self, key: KeyEvent) -> StepAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                self.start_over();
                StepAction::StartOver
            }
            _ => StepAction::Stay,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> StepAction {
        match key.code {
            KeyCode::Down | KeyCode::Tab => {
                self.form.focus_next();
                StepAction::Stay
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form.focus_prev();
                StepAction::Stay
            }
            KeyCode::Enter => self.submit(),
            code => {
                if let Some(field) = self.form.focused_mut() {
                    edit_field(field, code);
                }
                self.form.error = None;
                StepAction::Stay
            }
        }
    }

    fn submit(&mut self) -> StepAction {
        let submitted = match self.session.step() {
            1 => self.read_basic().and_then(|basic| {
                self.session
                    .submit_basic(basic)
                    .map_err(|e| e.to_string())
            }),
            2 => self.read_tenure().and_then(|tenure| {
                self.session
                    .submit_tenure_spending(tenure)
                    .map_err(|e| e.to_string())
            }),
            3 => {
                self.read_additional().and_then(|additional| {
                    self.session
                        .submit_additional_spending(additional)
                        .map_err(|e| e.to_string())
                })
            }
            _ => return StepAction::Stay,
        };

        match submitted {
            Ok(()) => {
                log::debug!("Wizard advanced to stage {}", self.session.step());
                self.form = StageForm::for_stage(self.session.stage());
                if matches!(self.session.stage(), WizardStage::Result { .. }) {
                    self.outcome = Some(self.evaluate());
                }
                StepAction::NextStage
            }
            Err(message) => {
                self.form.focus_invalid();
                self.form.error = Some(message);
                StepAction::Stay
            }
        }
    }

    fn evaluate(&self) -> Result<SinglePrediction, String> {
        let ctx = self.artifacts.as_ref().map_err(|e| e.clone())?;
        self.session
            .evaluate(ctx, &self.thresholds)
            .map_err(|e| e.to_string())
    }

    fn start_over(&mut self) {
        self.session.start_over();
        self.form = StageForm::for_stage(self.session.stage());
        self.outcome = None;
    }

    fn read_basic(&self) -> Result<BasicDetails, String> {
        Ok(BasicDetails {
            income: self.form.amount(0)?,
            education: Education::ALL
                .get(self.form.selected(1))
                .copied()
                .unwrap_or(Education::Graduation),
            marital_status: MaritalStatus::ALL
                .get(self.form.selected(2))
                .copied()
                .unwrap_or(MaritalStatus::Single),
        })
    }

    fn read_tenure(&self) -> Result<TenureSpending, String> {
        let customer_tenure = match self.form.fields.first() {
            Some(field) => field.days()?,
            None => 0,
        };
        Ok(TenureSpending {
            customer_tenure,
            wines: self.form.amount(1)?,
            fruits: self.form.amount(2)?,
            meat: self.form.amount(3)?,
        })
    }

    fn read_additional(&self) -> Result<AdditionalSpending, String> {
        Ok(AdditionalSpending {
            fish: self.form.amount(0)?,
            sweets: self.form.amount(1)?,
            gold: self.form.amount(2)?,
        })
    }
}

fn edit_field(field: &mut FormField, code: KeyCode) {
    match (field.kind, code) {
        (FieldKind::Choice(options), KeyCode::Right | KeyCode::Char(' ')) => {
            field.selected = (field.selected + 1) % options.len();
        }
        (FieldKind::Choice(options), KeyCode::Left) => {
            field.selected = (field.selected + options.len() - 1) % options.len();
        }
        (FieldKind::Amount, KeyCode::Char(c)) if c.is_ascii_digit() || c == '.' => {
            field.input.push(c);
        }
        (FieldKind::Days, KeyCode::Char(c)) if c.is_ascii_digit() => {
            field.input.push(c);
        }
        (FieldKind::Amount | FieldKind::Days, KeyCode::Backspace) => {
            field.input.pop();
        }
        _ => {}
    }
}

// ============================================================================
// Terminal Setup
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

// ============================================================================
// Entry Point
// ============================================================================

/// Run the wizard until the user quits
pub fn run_wizard(artifacts: Result<InferenceContext, String>, thresholds: Thresholds) -> Result<()> {
    let mut app = WizardApp::new(artifacts, thresholds);
    let mut terminal = setup_terminal()?;
    let result = run_wizard_loop(&mut terminal, &mut app);
    teardown_terminal();
    result
}

fn run_wizard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut WizardApp,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_wizard(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key) == StepAction::Exit {
                    return Ok(());
                }
            }
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn stage_color(stage: &WizardStage) -> Color {
    match stage {
        WizardStage::Basic => Color::Cyan,
        WizardStage::TenureSpending { .. } => Color::Magenta,
        WizardStage::AdditionalSpending { .. } => Color::Yellow,
        WizardStage::Result { .. } => Color::Green,
    }
}

const LOGO_HEIGHT: u16 = 3;
const HINT_HEIGHT: u16 = 1;
const BOX_WIDTH: u16 = 66;
const MIN_BOX_HEIGHT: u16 = 8;
const MIN_WIDTH: u16 = 40;

fn render_wizard(f: &mut Frame, app: &WizardApp) {
    let area = f.area();

    if area.height < LOGO_HEIGHT + MIN_BOX_HEIGHT + HINT_HEIGHT || area.width < MIN_WIDTH {
        render_too_small(f, area);
        if app.show_quit_confirm {
            render_quit_confirm_overlay(f);
        }
        return;
    }

    let box_width = BOX_WIDTH.min(area.width);
    let box_height = 16u16.min(area.height - LOGO_HEIGHT - HINT_HEIGHT);

    let total_height = LOGO_HEIGHT + box_height + HINT_HEIGHT;
    let x = area.x + area.width.saturating_sub(box_width) / 2;
    let y = area.y + (area.height - total_height) / 2;

    render_logo(f, Rect::new(x, y, box_width, LOGO_HEIGHT));

    let box_area = Rect::new(x, y + LOGO_HEIGHT, box_width, box_height).intersection(area);
    f.render_widget(Clear, box_area);

    let stage = app.session.stage();
    let color = stage_color(stage);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" Step {}/4 \u{00b7} {} ", stage.step(), stage.title()))
        .title_style(Style::default().fg(color).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    match stage {
        WizardStage::Result { .. } => render_result(f, inner, app),
        _ => render_form(f, inner, &app.form, color),
    }

    let hint_area =
        Rect::new(x, box_area.y + box_area.height, box_width, HINT_HEIGHT).intersection(area);
    render_help_bar(f, hint_area, app);

    if app.show_quit_confirm {
        render_quit_confirm_overlay(f);
    }
}

fn render_too_small(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);
    let message = format!(
        "Terminal too small ({}x{}). Resize to at least {}x{}.",
        area.width,
        area.height,
        MIN_WIDTH,
        LOGO_HEIGHT + MIN_BOX_HEIGHT + HINT_HEIGHT
    );
    f.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_logo(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "c u s t s e g",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "Customer Purchase Prediction",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_form(f: &mut Frame, area: Rect, form: &StageForm, color: Color) {
    let mut content = vec![Line::from("")];

    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let marker = if focused { "\u{25b8} " } else { "  " };
        let label_style = if focused {
            Style::default().fg(color).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(format!("  {}", marker), Style::default().fg(color)),
            Span::styled(format!("{}: ", field.label), label_style),
        ];
        match field.kind {
            FieldKind::Choice(_) => {
                spans.push(Span::styled("\u{25c2} ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::styled(
                    field.display_value(),
                    Style::default().fg(Color::White).bold(),
                ));
                spans.push(Span::styled(" \u{25b8}", Style::default().fg(Color::DarkGray)));
            }
            _ => {
                spans.push(Span::styled(
                    field.display_value(),
                    Style::default().fg(Color::White).bold(),
                ));
                if focused {
                    spans.push(Span::styled("\u{258c}", Style::default().fg(color)));
                }
            }
        }
        content.push(Line::from(spans));
        content.push(Line::from(""));
    }

    if let Some(err) = &form.error {
        content.push(Line::from(Span::styled(
            format!("  {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    f.render_widget(Paragraph::new(content), area);
}

fn render_result(f: &mut Frame, area: Rect, app: &WizardApp) {
    let mut content = vec![Line::from("")];

    match app.outcome() {
        Some(Ok(result)) => {
            content.push(Line::from(vec![
                Span::styled(
                    "  Predicted Number of Purchases: ",
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:.2}", result.prediction),
                    Style::default().fg(Color::White).bold(),
                ),
            ]));
            content.push(Line::from(""));
            content.push(Line::from(vec![
                Span::styled("  Customer Category: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    result.category.as_str(),
                    Style::default().fg(Color::Green).bold(),
                ),
            ]));
        }
        Some(Err(message)) => {
            content.push(Line::from(Span::styled(
                "  No prediction could be made",
                Style::default().fg(Color::Red).bold(),
            )));
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            )));
        }
        None => {}
    }

    content.push(Line::from(""));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" Start Over", Style::default().fg(Color::DarkGray)),
    ]));

    f.render_widget(
        Paragraph::new(content).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_help_bar(f: &mut Frame, area: Rect, app: &WizardApp) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));

    let spans = match app.session.stage() {
        WizardStage::Result { .. } => vec![
            key("  Enter/R"),
            text(" start over  "),
            key("Q/Esc"),
            text(" quit"),
        ],
        stage => vec![
            key("  Enter"),
            text(if stage.step() == 3 { " predict  " } else { " next  " }),
            key("\u{2191}\u{2193}"),
            text(" field  "),
            key("\u{2190}\u{2192}"),
            text(" choose  "),
            key("Q/Esc"),
            text(" quit"),
        ],
    };

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_quit_confirm_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(40, 8, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Quit Wizard? ")
        .title_style(Style::default().fg(Color::Red).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("      ", Style::default()),
            Span::styled("Y", Style::default().fg(Color::Cyan)),
            Span::styled(" yes  ", Style::default().fg(Color::DarkGray)),
            Span::styled("N", Style::default().fg(Color::Cyan)),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    f.render_widget(Paragraph::new(content), inner);
}
