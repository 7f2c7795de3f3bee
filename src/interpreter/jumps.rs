use crate::interpreter::errors::RuntimeError;
use crate::interpreter::ops::{Flow, StepContext};
use crate::memory::Machine;

/// `?`: continue execution at the instruction numbered by the register.
///
/// The pointer is set to `register - 1` (modulo the program length) so the
/// engine's normal advance lands exactly on `register`.
pub(crate) fn jump(machine: &mut Machine, ctx: &StepContext) -> Result<Flow, RuntimeError> {
    let register = machine
        .register_value()
        .map_err(|e| ctx.tape_fault(e, "read the jump target"))?;

    let len = ctx.program_len as i64;
    let target = (i64::from(register) - 1).rem_euclid(len);
    Ok(Flow::Goto(target as usize))
}
