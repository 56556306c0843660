use billed_core::Route;

use crate::views::escape;

/// Renders the employee login form, with an optional validation message.
pub fn login_ui(error: Option<&str>) -> String {
    let error = error
        .map(|message| {
            format!(
                r#"<p class="error-msg visible" data-testid="login-error">{}</p>"#,
                escape(message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="login-page">
  <div class="login-title">Billed</div>
  <div class="login-card">
    <h2 class="login-card-title">Employé</h2>
    <form data-testid="form-employee" method="post" action="{action}">
      <label for="employee-email-input">Votre email</label>
      <input required type="email" id="employee-email-input" name="email" data-testid="employee-email-input" class="form-control" placeholder="johndoe@email.com">
      {error}
      <button type="submit" data-testid="employee-login-button" class="btn btn-primary">Se connecter</button>
    </form>
  </div>
</div>"#,
        action = Route::Login.path(),
        error = error,
    )
}
